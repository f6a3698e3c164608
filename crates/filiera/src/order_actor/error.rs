//! Error types for the Order actor.

use crate::model::OrderStatus;
use crate::product_actor::ProductError;
use thiserror::Error;

/// Errors that can occur during order processing.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Order conflict: {0}")]
    Conflict(String),

    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// Buyer or seller is missing, inactive or not allowed to trade.
    #[error("Invalid order party: {0}")]
    InvalidParty(String),

    #[error("Order is {from} and cannot become {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// A stock reservation failed; earlier reservations were released.
    #[error(transparent)]
    Stock(#[from] ProductError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

framework_error_conversions!(OrderError);
