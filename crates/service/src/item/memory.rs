use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use models::item;
use crate::errors::ServiceError;
use crate::item::repository::ItemRepository;

/// Process-local item store behind a `RwLock`.
///
/// Applies the same record rules as the SQL store (validation and timestamp
/// bookkeeping live in `models::item`); nothing survives a restart.
#[derive(Clone, Default)]
pub struct MemoryItemRepository {
    inner: Arc<RwLock<HashMap<Uuid, item::Model>>>,
}

impl MemoryItemRepository {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl ItemRepository for MemoryItemRepository {
    async fn list(&self) -> Result<Vec<item::Model>, ServiceError> {
        let map = self.inner.read().await;
        let mut items: Vec<item::Model> = map.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn get(&self, id: Uuid) -> Result<Option<item::Model>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.get(&id).cloned())
    }

    async fn create(&self, name: &str, description: &str) -> Result<item::Model, ServiceError> {
        let model = item::build(name, description, None)?;
        let mut map = self.inner.write().await;
        map.insert(model.id, model.clone());
        Ok(model)
    }

    async fn update(&self, id: Uuid, name: Option<&str>, description: Option<&str>) -> Result<Option<item::Model>, ServiceError> {
        let mut map = self.inner.write().await;
        let Some(existing) = map.get_mut(&id) else { return Ok(None); };
        let mut next = existing.clone();
        item::apply_update(&mut next, name, description)?;
        *existing = next.clone();
        Ok(Some(next))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<item::Model>, ServiceError> {
        let mut map = self.inner.write().await;
        Ok(map.remove(&id))
    }

    async fn delete_all(&self) -> Result<u64, ServiceError> {
        let mut map = self.inner.write().await;
        let n = map.len() as u64;
        map.clear();
        Ok(n)
    }

    async fn insert_many(&self, items: Vec<item::Model>) -> Result<u64, ServiceError> {
        let mut map = self.inner.write().await;
        let n = items.len() as u64;
        map.extend(items.into_iter().map(|m| (m.id, m)));
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_repository_crud() -> Result<(), anyhow::Error> {
        let repo = MemoryItemRepository::new();
        assert!(repo.list().await?.is_empty());

        let a = repo.create("a", "first").await?;
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let b = repo.create("b", "second").await?;
        let ids: Vec<Uuid> = repo.list().await?.into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);

        let updated = repo.update(a.id, None, Some("changed")).await?.expect("exists");
        assert_eq!(updated.name, "a");
        assert_eq!(updated.description, "changed");
        assert_eq!(repo.get(a.id).await?.expect("stored"), updated);

        // a rejected update leaves the stored record untouched
        assert!(repo.update(a.id, Some(""), None).await.is_err());
        assert_eq!(repo.get(a.id).await?.expect("stored"), updated);

        assert!(repo.delete(b.id).await?.is_some());
        assert!(repo.delete(b.id).await?.is_none());
        assert_eq!(repo.delete_all().await?, 1);
        Ok(())
    }
}
