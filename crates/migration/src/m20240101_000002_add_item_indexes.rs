//! Indexes for `item`.
//! Listing is always newest first, so `created_at` gets its own index.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_item_created_at")
                    .table(Item::Table)
                    .col(Item::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_item_created_at").table(Item::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Item { Table, CreatedAt }
