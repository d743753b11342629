//! Error types for ixmeta

use thiserror::Error;

/// Core error type for catalog metadata extraction
#[derive(Error, Debug)]
pub enum IxmetaError {
    /// The connection or its introspection capability cannot be used.
    /// Fatal to a column fetch.
    #[error("Catalog access error: {0}")]
    CatalogAccess(String),

    /// An index-sequence lookup failed or one of its rows could not be decoded.
    #[error("Metadata query error: {0}")]
    MetadataQuery(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl IxmetaError {
    /// Re-tag any error raised while talking to the catalog as a metadata query failure.
    pub fn into_metadata_query(self) -> Self {
        match self {
            IxmetaError::MetadataQuery(_) => self,
            other => IxmetaError::MetadataQuery(other.to_string()),
        }
    }

    /// Re-tag any error raised by the introspection capability as a catalog access failure.
    pub fn into_catalog_access(self) -> Self {
        match self {
            IxmetaError::CatalogAccess(_) => self,
            other => IxmetaError::CatalogAccess(other.to_string()),
        }
    }

    pub fn is_catalog_access(&self) -> bool {
        matches!(self, IxmetaError::CatalogAccess(_))
    }

    pub fn is_metadata_query(&self) -> bool {
        matches!(self, IxmetaError::MetadataQuery(_))
    }
}

/// Result type alias for ixmeta operations
pub type Result<T> = std::result::Result<T, IxmetaError>;
