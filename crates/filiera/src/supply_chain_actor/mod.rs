//! # Supply Chain Actor
//!
//! Supply chains group products by territory and trace the points they pass through.
//! Indexed by lower-cased territorial area; products are checked against the
//! [`ProductClient`](crate::clients::ProductClient) injected as context.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::SupplyChain;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Supply Chain actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<SupplyChain>, ResourceClient<SupplyChain>) {
    ResourceActor::new(buffer_size)
}
