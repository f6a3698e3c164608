//! # Content Actor
//!
//! The moderation workflow: content is submitted `Pending` and a curator approves or
//! rejects it once. Items are indexed by [`ContentState`](crate::model::ContentState),
//! which backs the approved / pending / rejected listings.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::ContentItem;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Content actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<ContentItem>, ResourceClient<ContentItem>) {
    ResourceActor::new(buffer_size)
}
