use serde::{Deserialize, Serialize};

/// Where the store keeps its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Sqlite database file, or `sqlite::memory:`
    pub database: String,
}

impl StoreConfig {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("sqlite::memory:")
    }
}
