//! # Order Actor
//!
//! Orders are the one resource with real cross-actor work: creating one validates the
//! buyer and seller against the [`ActorStore`] and reserves stock from the
//! [`ProductClient`], both injected through [`OrderContext`] at `run` time.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`]
//! - [`actions`] - [`OrderAction`], the status transitions
//!
//! Orders are indexed by [`OrderStatus`](crate::model::OrderStatus).

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{ActorStore, ProductClient};
use crate::model::Order;
use actor_framework::{ResourceActor, ResourceClient};
use chrono::Duration;

/// Dependencies of the Order actor.
#[derive(Clone)]
pub struct OrderContext {
    pub actors: ActorStore,
    pub products: ProductClient,
    /// Offset from the order time to the expected delivery.
    pub delivery_lead: Duration,
}

impl OrderContext {
    pub fn new(actors: ActorStore, products: ProductClient, delivery_days: u32) -> Self {
        Self {
            actors,
            products,
            delivery_lead: Duration::days(i64::from(delivery_days)),
        }
    }
}

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
