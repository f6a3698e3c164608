use crate::model::ContentState;
use thiserror::Error;

/// Errors that can occur during content moderation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ContentError {
    /// No content item with this id.
    #[error("Content not found: {0}")]
    NotFound(String),

    #[error("Content conflict: {0}")]
    Conflict(String),

    /// The submission is missing a name or description.
    #[error("Content validation error: {0}")]
    ValidationError(String),

    /// The item already reached the opposite terminal state.
    #[error("Content is {from} and cannot become {to}")]
    InvalidTransition { from: ContentState, to: ContentState },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

framework_error_conversions!(ContentError);
