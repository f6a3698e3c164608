use crate::model::{ActorId, EventId};
use thiserror::Error;

/// Errors that can occur while organising events.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EventError {
    #[error("Event not found: {0}")]
    NotFound(String),

    #[error("Event conflict: {0}")]
    Conflict(String),

    #[error("Event validation error: {0}")]
    ValidationError(String),

    /// The organizer is unknown or not an animator.
    #[error("Invalid organizer: {0}")]
    InvalidOrganizer(String),

    /// The participant is unknown or inactive.
    #[error("Invalid participant: {0}")]
    InvalidParticipant(String),

    #[error("{actor} is already registered for {event}")]
    AlreadyRegistered { event: EventId, actor: ActorId },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

framework_error_conversions!(EventError);
