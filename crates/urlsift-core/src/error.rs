//! Error type shared by the link database and the engine.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Caller input rejected before touching storage (blank names, zero page size, ...).
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Error {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Error::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_key() {
        let err = Error::not_found("import", 42);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "import not found: 42");
    }

    #[test]
    fn validation_message() {
        let err = Error::Validation("profile name is required".into());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "invalid input: profile name is required");
    }
}
