use sea_orm::{entity::prelude::*, Set, DatabaseConnection, ActiveModelTrait, EntityTrait, QueryOrder};
use uuid::Uuid;
use chrono::{Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::errors;

pub const NAME_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 1000;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn validate_text(field: &str, value: &str, max: usize) -> Result<(), errors::ModelError> {
    if value.trim().is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} is required")));
    }
    if value.chars().count() > max {
        return Err(errors::ModelError::Validation(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    validate_text("name", name, NAME_MAX_LEN)
}

pub fn validate_description(description: &str) -> Result<(), errors::ModelError> {
    validate_text("description", description, DESCRIPTION_MAX_LEN)
}

/// Current time at the precision the database keeps (microseconds).
pub fn now() -> DateTimeWithTimeZone {
    Utc::now().trunc_subsecs(6).into()
}

/// Update timestamp that is strictly later than `previous`, even when the
/// clock has not advanced past it.
pub fn next_updated_at(previous: DateTimeWithTimeZone) -> DateTimeWithTimeZone {
    let now = now();
    if now > previous { now } else { previous + Duration::microseconds(1) }
}

/// Build a validated record with a fresh id.
///
/// `created_at` is kept when supplied, otherwise set to now; `updated_at`
/// is now, or `created_at` when that lies in the future.
pub fn build(name: &str, description: &str, created_at: Option<DateTimeWithTimeZone>) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    validate_description(description)?;
    let now = now();
    let created_at = created_at.unwrap_or(now);
    Ok(Model {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: description.to_string(),
        created_at,
        updated_at: now.max(created_at),
    })
}

/// Apply caller-mutable fields to `model`, re-validating them and refreshing
/// `updated_at`. Fields left as `None` keep their value.
pub fn apply_update(model: &mut Model, name: Option<&str>, description: Option<&str>) -> Result<(), errors::ModelError> {
    if let Some(n) = name { validate_name(n)?; }
    if let Some(d) = description { validate_description(d)?; }
    if let Some(n) = name { model.name = n.to_string(); }
    if let Some(d) = description { model.description = d.to_string(); }
    model.updated_at = next_updated_at(model.updated_at);
    Ok(())
}

impl Model {
    fn into_insert(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            name: Set(self.name),
            description: Set(self.description),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

pub async fn create(db: &DatabaseConnection, name: &str, description: &str) -> Result<Model, errors::ModelError> {
    let model = build(name, description, None)?;
    model.into_insert().insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Insert already-built records, returning how many were written.
pub async fn insert_many(db: &DatabaseConnection, models: Vec<Model>) -> Result<u64, errors::ModelError> {
    if models.is_empty() {
        return Ok(0);
    }
    Entity::insert_many(models.into_iter().map(Model::into_insert))
        .exec_without_returning(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn list_newest_first(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Find-by-id-and-update with validation; `None` when the record is absent.
pub async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    let Some(existing) = found else { return Ok(None); };

    let mut next = existing.clone();
    apply_update(&mut next, name, description)?;

    let mut am: ActiveModel = existing.into();
    am.name = Set(next.name);
    am.description = Set(next.description);
    am.updated_at = Set(next.updated_at);
    let updated = am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(Some(updated))
}

/// Find-by-id-and-delete; returns the removed record.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    let Some(existing) = found else { return Ok(None); };
    let res = Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok((res.rows_affected > 0).then_some(existing))
}

pub async fn delete_all(db: &DatabaseConnection) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_many()
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}
