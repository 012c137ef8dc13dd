use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed input: non-positive amounts, empty required text.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Duplicate project name, or shrinking a target below committed funds.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Operation not allowed in the entity's current lifecycle state.
    #[error("Invalid state: {0}")]
    State(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}
