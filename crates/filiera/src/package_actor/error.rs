use thiserror::Error;

/// Errors that can occur while assembling packages.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PackageError {
    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Package conflict: {0}")]
    Conflict(String),

    #[error("Package validation error: {0}")]
    ValidationError(String),

    /// The distributor is unknown or not a distributor.
    #[error("Invalid distributor: {0}")]
    InvalidDistributor(String),

    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

framework_error_conversions!(PackageError);
