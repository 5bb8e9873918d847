use std::time::Duration;

use anyhow::Result;
use uuid::Uuid;

use crate::{errors::ModelError, item};

#[tokio::test]
async fn test_create_then_find() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let db = super::memory_db().await?;

    let created = item::create(&db, "Widget", "A small widget").await?;
    assert_eq!(created.created_at, created.updated_at);

    let all = item::list_newest_first(&db).await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], created);
    Ok(())
}

#[tokio::test]
async fn test_create_rejects_invalid_fields() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let db = super::memory_db().await?;

    let too_long = "x".repeat(item::NAME_MAX_LEN + 1);
    let res = item::create(&db, &too_long, "desc").await;
    assert!(matches!(res, Err(ModelError::Validation(_))));
    let res = item::create(&db, "name", "").await;
    assert!(matches!(res, Err(ModelError::Validation(_))));

    assert!(item::list_newest_first(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_list_is_newest_first() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let db = super::memory_db().await?;

    let first = item::create(&db, "first", "one").await?;
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = item::create(&db, "second", "two").await?;
    tokio::time::sleep(Duration::from_millis(5)).await;
    let third = item::create(&db, "third", "three").await?;

    let ids: Vec<Uuid> = item::list_newest_first(&db).await?.into_iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
    Ok(())
}

#[tokio::test]
async fn test_update_refreshes_updated_at() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let db = super::memory_db().await?;

    let created = item::create(&db, "A", "B").await?;
    let updated = item::update(&db, created.id, Some("A2"), Some("B2")).await?.expect("exists");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "A2");
    assert_eq!(updated.description, "B2");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.created_at);

    let bad = item::update(&db, created.id, Some(""), None).await;
    assert!(matches!(bad, Err(ModelError::Validation(_))));

    let missing = item::update(&db, Uuid::new_v4(), Some("x"), None).await?;
    assert!(missing.is_none());
    Ok(())
}

#[tokio::test]
async fn test_delete_and_delete_all() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let db = super::memory_db().await?;

    let a = item::create(&db, "a", "a").await?;
    let removed = item::delete(&db, a.id).await?.expect("removed");
    assert_eq!(removed.id, a.id);
    assert!(item::delete(&db, a.id).await?.is_none());

    let batch = vec![
        item::build("b", "b", None)?,
        item::build("c", "c", None)?,
    ];
    assert_eq!(item::insert_many(&db, batch).await?, 2);
    assert_eq!(item::delete_all(&db).await?, 2);
    assert!(item::list_newest_first(&db).await?.is_empty());
    Ok(())
}
