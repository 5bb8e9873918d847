#![cfg(test)]
use std::sync::Arc;

use configs::DatabaseConfig;

use crate::item::{open_repository, ItemRepository};

/// SQL-backed repository over a private in-memory SQLite database.
pub async fn sqlite_repository() -> Result<Arc<dyn ItemRepository>, anyhow::Error> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    open_repository(&cfg).await
}
