#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Version {version_id} not found")]
    VersionNotFound { version_id: String },

    #[error("Version {version_id} does not belong to canvas {canvas_id}")]
    VersionMismatch {
        canvas_id: String,
        version_id: String,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`] with any displayable id.
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether the caller may retry the same request later.
    ///
    /// Only storage faults are transient; everything else is a property of
    /// the request itself.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::StorageUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_includes_entity_and_id() {
        let err = CoreError::not_found("Canvas", "abc-123");
        assert_eq!(err.to_string(), "Entity not found: Canvas with id abc-123");
    }

    #[test]
    fn test_only_storage_errors_are_retryable() {
        assert!(CoreError::StorageUnavailable("pool timed out".into()).is_retryable());
        assert!(!CoreError::Validation("too long".into()).is_retryable());
        assert!(!CoreError::VersionNotFound {
            version_id: "v".into()
        }
        .is_retryable());
        assert!(!CoreError::VersionMismatch {
            canvas_id: "c".into(),
            version_id: "v".into()
        }
        .is_retryable());
    }
}
