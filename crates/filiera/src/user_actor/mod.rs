//! # User Actor
//!
//! Accounts created from prototypes. Emails are unique across accounts (enforced through
//! [`conflicts_with`](actor_framework::ActorEntity::conflicts_with)) and accounts are
//! indexed by [`RegistrationState`](crate::model::RegistrationState) so pending
//! registrations are a lookup.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::User;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new User actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, ResourceClient<User>) {
    ResourceActor::new(buffer_size)
}
