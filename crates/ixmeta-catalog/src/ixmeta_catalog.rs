//! Catalog query adapter
//!
//! Asks each engine's catalog for the true key order of every index on a
//! table. PostgreSQL, MySQL/MariaDB and SQL Server have dedicated providers;
//! every other engine gets an empty answer instead of an error.

mod mssql;
mod mysql;
mod postgres;
mod provider;
mod registry;

#[cfg(test)]
mod provider_tests;
#[cfg(test)]
mod registry_tests;

pub use mssql::MssqlSequenceProvider;
pub use mysql::MySqlSequenceProvider;
pub use postgres::PostgresSequenceProvider;
pub use provider::{
    decode_sequence_row, scan_sequences, IndexColumnSequences, NoopSequenceProvider,
    SequenceProvider,
};
pub use registry::{lookup_index_column_sequences, lookup_with_engine, SequenceProviderRegistry};

/// Catalog SQL text per engine
pub mod sql {
    pub mod postgres {
        pub use crate::postgres::{DEFAULT_SCHEMA, INDEX_SEQUENCE_SQL};
    }
    pub mod mysql {
        pub use crate::mysql::{CURRENT_DATABASE_SQL, INDEX_SEQUENCE_SQL};
    }
    pub mod mssql {
        pub use crate::mssql::{DEFAULT_SCHEMA, INDEX_SEQUENCE_SQL};
    }
}
