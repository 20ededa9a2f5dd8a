//! Loader settings.
//!
//! [`LoaderConfig`] deserializes from a TOML table; missing keys keep their
//! defaults, so an empty file is a valid configuration.
//!
//! ```
//! # use graphml_core::config::LoaderConfig;
//! let config = LoaderConfig::default();
//! assert!(config.check_schema_location);
//! assert!(config.run_setup_hooks);
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Reject a root whose `xsi:schemaLocation` does not reference GraphML.
    pub check_schema_location: bool,

    /// Run each used namespace's setup hook (the yWorks geometry finalizer,
    /// for one) once the hierarchy is assembled.
    pub run_setup_hooks: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            check_schema_location: true,
            run_setup_hooks: true,
        }
    }
}
