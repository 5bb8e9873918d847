use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use models::item;
use crate::errors::ServiceError;

/// Storage seam for items.
///
/// Implementations own all persisted state; callers get owned copies.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items, newest `created_at` first.
    async fn list(&self) -> Result<Vec<item::Model>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<item::Model>, ServiceError>;
    async fn create(&self, name: &str, description: &str) -> Result<item::Model, ServiceError>;
    /// Validating find-and-update; `Ok(None)` when `id` is absent.
    async fn update(&self, id: Uuid, name: Option<&str>, description: Option<&str>) -> Result<Option<item::Model>, ServiceError>;
    /// Find-and-delete; returns the removed record.
    async fn delete(&self, id: Uuid) -> Result<Option<item::Model>, ServiceError>;
    async fn delete_all(&self) -> Result<u64, ServiceError>;
    async fn insert_many(&self, items: Vec<item::Model>) -> Result<u64, ServiceError>;
    /// Release underlying resources (connection pool) on shutdown.
    async fn close(&self) -> Result<(), ServiceError> { Ok(()) }
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmItemRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmItemRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ItemRepository for SeaOrmItemRepository {
    async fn list(&self) -> Result<Vec<item::Model>, ServiceError> {
        Ok(item::list_newest_first(&self.db).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<item::Model>, ServiceError> {
        item::Entity::find_by_id(id).one(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn create(&self, name: &str, description: &str) -> Result<item::Model, ServiceError> {
        // validations are in models::item
        Ok(item::create(&self.db, name, description).await?)
    }

    async fn update(&self, id: Uuid, name: Option<&str>, description: Option<&str>) -> Result<Option<item::Model>, ServiceError> {
        Ok(item::update(&self.db, id, name, description).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<item::Model>, ServiceError> {
        Ok(item::delete(&self.db, id).await?)
    }

    async fn delete_all(&self) -> Result<u64, ServiceError> {
        Ok(item::delete_all(&self.db).await?)
    }

    async fn insert_many(&self, items: Vec<item::Model>) -> Result<u64, ServiceError> {
        Ok(item::insert_many(&self.db, items).await?)
    }

    async fn close(&self) -> Result<(), ServiceError> {
        self.db.clone().close().await.map_err(|e| ServiceError::Db(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use crate::item::ItemService;
    use crate::test_support::sqlite_repository;

    #[tokio::test]
    async fn seaorm_item_crud_service() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let svc = ItemService::new(sqlite_repository().await?);

        let a = svc.create("A", "B").await?;
        let found = svc.get(&a.id.to_string()).await?;
        assert_eq!(found.name, "A");
        assert_eq!(found.created_at, found.updated_at);

        let updated = svc.update(&a.id.to_string(), Some("A2"), Some("B2")).await?;
        assert_eq!(updated.name, "A2");
        assert!(updated.updated_at > a.created_at);
        assert_eq!(updated.created_at, a.created_at);

        let list_all = svc.get_all().await?;
        assert!(list_all.iter().any(|x| x.id == a.id));

        let deleted = svc.delete(&a.id.to_string()).await?;
        assert_eq!(deleted.id, a.id);
        let after = svc.get(&a.id.to_string()).await;
        assert!(after.unwrap_err().is_not_found());

        svc.repository().close().await?;
        Ok(())
    }
}
