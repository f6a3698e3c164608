use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SupplyChainError {
    #[error("Supply chain not found: {0}")]
    NotFound(String),

    #[error("Supply chain conflict: {0}")]
    Conflict(String),

    #[error("Supply chain validation error: {0}")]
    ValidationError(String),

    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

framework_error_conversions!(SupplyChainError);
