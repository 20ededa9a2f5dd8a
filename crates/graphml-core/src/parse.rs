// crates/graphml-core/src/parse.rs
//
// quick-xml 0.38.4 event reader that turns a GraphML document into an owned
// `RawElement` tree.
// - Keeps qualified tag names (`y:ShapeNode`) so namespace prefixes can be
//   resolved against the root's `xmlns:*` declarations later on
// - Keeps attributes verbatim (unescaped) in a BTreeMap
// - General references (`&amp;`, `&#38;`) arrive as their own events in 0.38
//   and are folded back into the surrounding text
// - Text made only of whitespace is dropped once the element closes
//
// Root validation (`validate_root`) implements the two fatal namespace checks.

use crate::config::LoaderConfig;
use crate::error::{LoadError, LoadResult};
use quick_xml::Reader;
use quick_xml::events::{BytesEnd, BytesRef, BytesStart, Event};
use quick_xml::escape::resolve_predefined_entity;
use std::collections::BTreeMap;
use std::str;

pub const GRAPHML_NAMESPACE: &str = "http://graphml.graphdrawing.org/xmlns";
pub const GRAPHML_XSD: &str = "http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd";
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

const XMLNS_PREFIX: &str = "xmlns:";

/// One element of the input markup, owned and detached from the reader.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawElement {
    /// Qualified tag name as written, e.g. `node` or `y:ShapeNode`.
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<RawElement>,
    /// Character data directly inside this element, `None` when blank.
    pub text: Option<String>,
}

impl RawElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: RawElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Namespace prefix of the tag, `None` for unprefixed (core) tags.
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// First direct child with the given local name, whatever its prefix.
    pub fn child(&self, local: &str) -> Option<&RawElement> {
        self.children.iter().find(|c| c.local_name() == local)
    }

    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a RawElement> {
        self.children.iter().filter(move |c| c.local_name() == local)
    }

    /// `prefix -> uri` for every `xmlns:prefix="uri"` declared on this element.
    pub fn namespace_declarations(&self) -> BTreeMap<String, String> {
        self.attributes
            .iter()
            .filter_map(|(k, v)| {
                k.strip_prefix(XMLNS_PREFIX)
                    .map(|prefix| (prefix.to_string(), v.clone()))
            })
            .collect()
    }
}

/// Parse GraphML markup into its root element.
pub fn parse_markup(xml: &str) -> LoadResult<RawElement> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    // open elements, innermost last, each with its pending text
    let mut stack: Vec<(RawElement, String)> = Vec::new();
    let mut root: Option<RawElement> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let element = element_from_start(&e)?;
                stack.push((element, String::new()));
            }

            Event::Empty(e) => {
                let element = element_from_start(&e)?;
                attach(element, &mut stack, &mut root)?;
            }

            Event::Text(t) => {
                if let Some((_, text)) = stack.last_mut() {
                    text.push_str(&t.decode()?);
                }
            }

            Event::CData(c) => {
                if let Some((_, text)) = stack.last_mut() {
                    text.push_str(&c.decode()?);
                }
            }

            Event::GeneralRef(r) => {
                if let Some((_, text)) = stack.last_mut() {
                    push_reference(&r, text)?;
                }
            }

            Event::End(e) => {
                let name = local_name_end(&e)?;
                let (mut element, text) = stack.pop().ok_or_else(|| {
                    LoadError::Structure(format!("closing </{name}> but nothing is open"))
                })?;
                if !text.trim().is_empty() {
                    element.text = Some(text);
                }
                attach(element, &mut stack, &mut root)?;
            }

            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    if let Some((open, _)) = stack.last() {
        return Err(LoadError::Structure(format!(
            "unclosed element <{}>",
            open.name
        )));
    }

    root.ok_or(LoadError::EmptyDocument)
}

/// Reject documents that are not GraphML at all.
///
/// The root must be `graphml` with the GraphML default namespace. An
/// `xmlns:xsi` declaration must name the XML Schema instance namespace, and a
/// `xsi:schemaLocation` (when checked) must mention either the GraphML
/// namespace or its XSD.
pub fn validate_root(root: &RawElement, config: &LoaderConfig) -> LoadResult<()> {
    if root.local_name() != "graphml" {
        return Err(LoadError::NotGraphml {
            found: root.name.clone(),
        });
    }

    match root.attr("xmlns") {
        Some(GRAPHML_NAMESPACE) => {}
        other => {
            return Err(LoadError::RootNamespace {
                found: other.map(str::to_string),
            });
        }
    }

    if let Some(xsi) = root.attr("xmlns:xsi")
        && xsi != XSI_NAMESPACE
    {
        return Err(LoadError::SchemaInstance {
            found: xsi.to_string(),
        });
    }

    if config.check_schema_location
        && let Some(location) = root.attr("xsi:schemaLocation")
        && !(location.contains(GRAPHML_NAMESPACE) || location.contains(GRAPHML_XSD))
    {
        return Err(LoadError::SchemaLocation {
            found: location.to_string(),
        });
    }

    Ok(())
}

fn attach(
    element: RawElement,
    stack: &mut [(RawElement, String)],
    root: &mut Option<RawElement>,
) -> LoadResult<()> {
    if let Some((parent, _)) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(LoadError::Structure(format!(
            "second top-level element <{}>",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

fn push_reference(r: &BytesRef<'_>, text: &mut String) -> LoadResult<()> {
    let name = r.decode()?;
    if let Some(code) = name.strip_prefix('#') {
        let parsed = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        match parsed.and_then(char::from_u32) {
            Some(ch) => text.push(ch),
            None => {
                return Err(LoadError::Structure(format!(
                    "invalid character reference &{name};"
                )));
            }
        }
    } else if let Some(resolved) = resolve_predefined_entity(&name) {
        text.push_str(resolved);
    } else {
        // undeclared entity, keep it literally
        text.push('&');
        text.push_str(&name);
        text.push(';');
    }
    Ok(())
}

fn element_from_start(e: &BytesStart<'_>) -> LoadResult<RawElement> {
    Ok(RawElement {
        name: local_name_start(e)?,
        attributes: attrs_to_map(e)?,
        children: Vec::new(),
        text: None,
    })
}

fn attrs_to_map(e: &BytesStart<'_>) -> LoadResult<BTreeMap<String, String>> {
    let mut out = BTreeMap::new();
    for a in e.attributes() {
        let a = a?;
        let key = str::from_utf8(a.key.as_ref())?.to_string();
        let val = a.unescape_value()?.to_string();
        out.insert(key, val);
    }
    Ok(out)
}

fn local_name_start(e: &BytesStart<'_>) -> LoadResult<String> {
    Ok(str::from_utf8(e.name().as_ref())?.to_string())
}

fn local_name_end(e: &BytesEnd<'_>) -> LoadResult<String> {
    Ok(str::from_utf8(e.name().as_ref())?.to_string())
}
