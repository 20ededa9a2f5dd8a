//! Error types for loading GraphML documents.
//!
//! Only [`LoadError`] ever reaches the caller of [`crate::load`]. The other two
//! types describe conditions the pipeline absorbs and logs.

/// A condition that aborts a load.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("utf8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    #[error("unexpected structure: {0}")]
    Structure(String),

    #[error("document has no root element")]
    EmptyDocument,

    #[error("root element is <{found}>, expected <graphml>")]
    NotGraphml { found: String },

    #[error("root namespace is {found:?}, expected \"{}\"", crate::parse::GRAPHML_NAMESPACE)]
    RootNamespace { found: Option<String> },

    #[error("xmlns:xsi is \"{found}\", expected \"{}\"", crate::parse::XSI_NAMESPACE)]
    SchemaInstance { found: String },

    #[error("xsi:schemaLocation \"{found}\" does not reference GraphML")]
    SchemaLocation { found: String },

    #[error("document contains no <graph> element")]
    NoGraph,
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Failure of a namespace constructor while reading its markup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepresentationError {
    #[error("<{element}> is missing required child <{child}>")]
    MissingChild {
        element: String,
        child: &'static str,
    },

    #[error("invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

pub type RepresentationResult<T> = Result<T, RepresentationError>;

/// Misuse of the document model API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("element {id} already has a representation")]
    RepresentationAlreadySet { id: String },
}
