use crate::types::DbId;

/// Domain error shared by every layer of the backend.
///
/// The API crate maps each variant to one HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// 404: the addressed tour, image, hotspot or user does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// 400: the request is well-formed but breaks a domain rule.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// 409: e.g. an email address that is already registered.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 401: missing or bad credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound { entity, id }
    }
}
