//! Extraction options, loadable from TOML

use std::path::Path;

use ixmeta_core::{IxmetaError, Result};
use serde::{Deserialize, Serialize};

/// How much index information a column fetch should gather.
///
/// ```toml
/// index_tag = true
/// sequence_lookup = true
/// engine_override = "mysql"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractOptions {
    /// Attach index memberships to columns at all
    pub index_tag: bool,
    /// Ask the catalog for index key order; when off every priority is the
    /// column's position in the index's own column list
    pub sequence_lookup: bool,
    /// Engine id used instead of the connection's, both to pick the catalog
    /// query and to decide `Column::use_scan_type`
    pub engine_override: Option<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            index_tag: true,
            sequence_lookup: true,
            engine_override: None,
        }
    }
}

impl ExtractOptions {
    /// Columns only, no index lookups
    pub fn columns_only() -> Self {
        Self {
            index_tag: false,
            ..Self::default()
        }
    }

    pub fn with_index_tag(mut self, index_tag: bool) -> Self {
        self.index_tag = index_tag;
        self
    }

    pub fn with_sequence_lookup(mut self, sequence_lookup: bool) -> Self {
        self.sequence_lookup = sequence_lookup;
        self
    }

    pub fn with_engine_override(mut self, engine_id: impl Into<String>) -> Self {
        self.engine_override = Some(engine_id.into());
        self
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let options: Self = toml::from_str(source)?;
        if let Some(engine) = &options.engine_override {
            if engine.trim().is_empty() {
                return Err(IxmetaError::Configuration(
                    "engine_override must not be empty".to_string(),
                ));
            }
        }
        Ok(options)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading extract options");
        Self::from_toml_str(&source)
    }
}
