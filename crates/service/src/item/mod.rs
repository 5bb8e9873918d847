//! Item CRUD: repository seam, storage backends and the application service.

pub mod repository;
pub mod memory;
pub mod service;
pub mod seed;

use std::sync::Arc;

use configs::DatabaseConfig;
use tracing::info;

pub use memory::MemoryItemRepository;
pub use repository::{ItemRepository, SeaOrmItemRepository};
pub use service::{DynItemService, ItemService};

/// Open the repository selected by `cfg`: the in-memory store for
/// `memory://`, otherwise a SeaORM pool (migrated when `auto_migrate`).
pub async fn open_repository(cfg: &DatabaseConfig) -> anyhow::Result<Arc<dyn ItemRepository>> {
    if cfg.is_memory() {
        info!(event = "repository_open", backend = "memory", "using in-memory item store");
        return Ok(Arc::new(MemoryItemRepository::new()));
    }
    let db = models::db::connect_with_config(cfg).await?;
    if cfg.auto_migrate {
        models::db::migrate(&db).await?;
        info!(event = "migrations_applied", "database schema up to date");
    }
    info!(event = "repository_open", backend = "seaorm", "using SQL item store");
    Ok(Arc::new(SeaOrmItemRepository::new(db)))
}
