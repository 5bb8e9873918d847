//! Sample data for local development and demos.

use models::item;

use crate::errors::ServiceError;
use crate::item::repository::ItemRepository;

pub const SAMPLE_ITEMS: [(&str, &str); 5] = [
    ("Sample Item 1", "This is the first sample item for testing the API"),
    ("Sample Item 2", "This is the second sample item with more details"),
    ("Sample Item 3", "This is the third sample item for demonstration purposes"),
    ("Hackathon Project", "A full-stack application built during the hackathon"),
    ("API Integration", "Example of frontend-backend communication"),
];

/// Replace every stored item with [`SAMPLE_ITEMS`] and return what was written.
pub async fn seed<R: ItemRepository + ?Sized>(repo: &R) -> Result<Vec<item::Model>, ServiceError> {
    let cleared = repo.delete_all().await?;
    tracing::info!(event = "seed_cleared", cleared, "cleared existing items");

    let items = SAMPLE_ITEMS
        .iter()
        .map(|(name, description)| item::build(name, description, None))
        .collect::<Result<Vec<_>, _>>()?;
    repo.insert_many(items.clone()).await?;
    Ok(items)
}
