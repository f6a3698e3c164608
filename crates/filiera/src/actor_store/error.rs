use thiserror::Error;

/// Errors that can occur during actor store operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActorError {
    /// The requested actor was not found.
    #[error("Actor not found: {0}")]
    NotFound(String),

    /// An actor with the same identifier already exists.
    #[error("Actor conflict: {0}")]
    Conflict(String),

    /// The actor data provided is invalid.
    #[error("Actor validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

framework_error_conversions!(ActorError);
