//! # Event Actor
//!
//! Events organised by animators and the participations registered on them. The actor
//! store is injected as context: organizers and participants are checked against it.
//! Events are indexed by organizer.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Event;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Event actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Event>, ResourceClient<Event>) {
    ResourceActor::new(buffer_size)
}
