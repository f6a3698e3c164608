//! # Actor Store
//!
//! The resource actor holding every marketplace [`Actor`](crate::model::Actor), indexed
//! by id and by [`ActorType`](crate::model::ActorType). All reads hand out owned copies;
//! all writes go through [`ActorStore`](crate::clients::ActorStore), so the stored
//! actors can only change inside the actor task.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for `Actor`
//! - [`error`] - [`ActorError`]
//! - [`actions`] - [`ActorAction`] (activate / deactivate)

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Actor;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new actor-store actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Actor>, ResourceClient<Actor>) {
    ResourceActor::new(buffer_size)
}
