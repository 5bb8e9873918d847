use std::sync::Arc;
use uuid::Uuid;
use tracing::{error, info, instrument};

use models::item;
use crate::errors::ServiceError;
use crate::item::repository::ItemRepository;

const ENTITY: &str = "Item";

/// Application service for items: one operation per CRUD action.
///
/// Absent records become `ServiceError::NotFound`; every other failure is
/// logged and passed through unchanged. No retries.
pub struct ItemService<R: ItemRepository + ?Sized> {
    repo: Arc<R>,
}

/// Service over a type-erased repository, as held by the HTTP layer.
pub type DynItemService = ItemService<dyn ItemRepository>;

impl<R: ItemRepository + ?Sized> Clone for ItemService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

/// Identifiers that do not parse are reported like absent ones.
fn parse_id(id: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(id.trim()).map_err(|_| ServiceError::not_found(ENTITY))
}

impl<R: ItemRepository + ?Sized> ItemService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub fn repository(&self) -> &Arc<R> { &self.repo }

    pub async fn get_all(&self) -> Result<Vec<item::Model>, ServiceError> {
        self.repo.list().await.inspect_err(|e| {
            error!(err = %e, "error getting all items");
        })
    }

    pub async fn get(&self, id: &str) -> Result<item::Model, ServiceError> {
        let res = async {
            let uid = parse_id(id)?;
            self.repo.get(uid).await?.ok_or_else(|| ServiceError::not_found(ENTITY))
        }
        .await;
        res.inspect_err(|e| error!(%id, err = %e, "error getting item"))
    }

    #[instrument(skip(self, description))]
    pub async fn create(&self, name: &str, description: &str) -> Result<item::Model, ServiceError> {
        match self.repo.create(name, description).await {
            Ok(m) => {
                info!(id = %m.id, "item created");
                Ok(m)
            }
            Err(e) => {
                error!(err = %e, "error creating item");
                Err(e)
            }
        }
    }

    #[instrument(skip(self, name, description))]
    pub async fn update(&self, id: &str, name: Option<&str>, description: Option<&str>) -> Result<item::Model, ServiceError> {
        let res = async {
            let uid = parse_id(id)?;
            self.repo
                .update(uid, name, description)
                .await?
                .ok_or_else(|| ServiceError::not_found(ENTITY))
        }
        .await;
        match res {
            Ok(m) => {
                info!(id = %m.id, "item updated");
                Ok(m)
            }
            Err(e) => {
                error!(%id, err = %e, "error updating item");
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<item::Model, ServiceError> {
        let res = async {
            let uid = parse_id(id)?;
            self.repo.delete(uid).await?.ok_or_else(|| ServiceError::not_found(ENTITY))
        }
        .await;
        match res {
            Ok(m) => {
                info!(id = %m.id, "item deleted");
                Ok(m)
            }
            Err(e) => {
                error!(%id, err = %e, "error deleting item");
                Err(e)
            }
        }
    }
}
