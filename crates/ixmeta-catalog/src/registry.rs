//! Registry of index sequence providers keyed by engine id

use ixmeta_core::{Connection, Result};
use std::collections::HashMap;
use std::sync::Arc;

use crate::mssql::MssqlSequenceProvider;
use crate::mysql::MySqlSequenceProvider;
use crate::postgres::PostgresSequenceProvider;
use crate::provider::{IndexColumnSequences, NoopSequenceProvider, SequenceProvider};

/// Maps engine ids to the provider that knows their catalog.
///
/// Ids are matched case-insensitively. Unknown ids resolve to
/// `NoopSequenceProvider`, so a lookup never fails for lack of a provider.
pub struct SequenceProviderRegistry {
    providers: HashMap<String, Arc<dyn SequenceProvider>>,
    fallback: Arc<dyn SequenceProvider>,
}

impl SequenceProviderRegistry {
    /// Create a registry with no engine providers
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
            fallback: Arc::new(NoopSequenceProvider),
        }
    }

    /// Create a registry with the PostgreSQL, MySQL and SQL Server providers
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_engine(Arc::new(PostgresSequenceProvider::new()));
        registry.register_engine(Arc::new(MySqlSequenceProvider::new()));
        registry.register_engine(Arc::new(MssqlSequenceProvider::new()));
        registry
    }

    /// Register a provider under a single engine id
    pub fn register(&mut self, engine_id: &str, provider: Arc<dyn SequenceProvider>) {
        let key = engine_id.trim().to_lowercase();
        tracing::debug!(engine = %key, "registering index sequence provider");
        self.providers.insert(key, provider);
    }

    /// Register a provider under every alias of its engine family
    pub fn register_engine(&mut self, provider: Arc<dyn SequenceProvider>) {
        for alias in provider.engine().aliases() {
            self.register(alias, provider.clone());
        }
    }

    /// Provider for an engine id, or the no-op provider
    pub fn get(&self, engine_id: &str) -> Arc<dyn SequenceProvider> {
        match self.providers.get(&engine_id.trim().to_lowercase()) {
            Some(provider) => provider.clone(),
            None => {
                tracing::debug!(engine = %engine_id, "no index sequence provider, using no-op");
                self.fallback.clone()
            }
        }
    }

    /// Check if a provider is registered for an engine id
    pub fn has(&self, engine_id: &str) -> bool {
        self.providers.contains_key(&engine_id.trim().to_lowercase())
    }

    /// List all registered engine ids
    pub fn list(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.providers.keys().map(|s| s.as_str()).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for SequenceProviderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Look up index key order for a table using the provider for `conn`'s engine
pub async fn lookup_index_column_sequences(
    conn: &dyn Connection,
    registry: &SequenceProviderRegistry,
    schema: Option<&str>,
    table: &str,
) -> Result<IndexColumnSequences> {
    lookup_with_engine(conn, registry, conn.engine_id(), schema, table).await
}

/// Like `lookup_index_column_sequences`, with an explicit engine id
pub async fn lookup_with_engine(
    conn: &dyn Connection,
    registry: &SequenceProviderRegistry,
    engine_id: &str,
    schema: Option<&str>,
    table: &str,
) -> Result<IndexColumnSequences> {
    registry
        .get(engine_id)
        .index_column_sequences(conn, schema, table)
        .await
}
