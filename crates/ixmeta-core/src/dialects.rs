//! Engine families and the identifiers drivers use for them

use serde::{Deserialize, Serialize};

/// Database engine family, as far as catalog queries are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineFamily {
    Postgres,
    MySql,
    SqlServer,
    Sqlite,
    /// Anything without a known catalog layout
    Other,
}

impl EngineFamily {
    /// Resolve a driver or dialect id (case-insensitive)
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => EngineFamily::Postgres,
            "mysql" | "mariadb" => EngineFamily::MySql,
            "mssql" | "sqlserver" => EngineFamily::SqlServer,
            "sqlite" | "sqlite3" => EngineFamily::Sqlite,
            _ => EngineFamily::Other,
        }
    }

    pub fn canonical_id(&self) -> &'static str {
        match self {
            EngineFamily::Postgres => "postgres",
            EngineFamily::MySql => "mysql",
            EngineFamily::SqlServer => "mssql",
            EngineFamily::Sqlite => "sqlite",
            EngineFamily::Other => "other",
        }
    }

    /// Every id that resolves to this family
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            EngineFamily::Postgres => &["postgres", "postgresql", "pg"],
            EngineFamily::MySql => &["mysql", "mariadb"],
            EngineFamily::SqlServer => &["mssql", "sqlserver"],
            EngineFamily::Sqlite => &["sqlite", "sqlite3"],
            EngineFamily::Other => &[],
        }
    }

    /// MySQL and SQLite declared types are what generated code should use;
    /// every other engine is better served by the driver's scanned type.
    pub fn prefers_scan_type(&self) -> bool {
        !matches!(self, EngineFamily::MySql | EngineFamily::Sqlite)
    }
}

impl std::fmt::Display for EngineFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_id())
    }
}
