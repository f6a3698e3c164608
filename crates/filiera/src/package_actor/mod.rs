//! # Package Actor
//!
//! Product bundles assembled by distributors, indexed by distributor.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{ActorStore, ProductClient};
use crate::model::ProductPackage;
use actor_framework::{ResourceActor, ResourceClient};

/// Dependencies of the Package actor.
#[derive(Clone)]
pub struct PackageContext {
    pub actors: ActorStore,
    pub products: ProductClient,
}

/// Creates a new Package actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<ProductPackage>, ResourceClient<ProductPackage>) {
    ResourceActor::new(buffer_size)
}
