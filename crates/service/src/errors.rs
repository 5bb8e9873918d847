use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error(transparent)]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Constraint violations surface as `Validation` whichever layer raised them.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Model(models::errors::ModelError::Validation(_)))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn not_found_message_names_entity() {
        assert_eq!(ServiceError::not_found("Item").to_string(), "Item not found");
    }

    #[test]
    fn model_validation_counts_as_validation() {
        let e: ServiceError = ModelError::Validation("name is required".into()).into();
        assert!(e.is_validation());
        assert_eq!(e.to_string(), "name is required");

        let db: ServiceError = ModelError::Db("connection refused".into()).into();
        assert!(!db.is_validation());
        assert!(!db.is_not_found());
    }
}
