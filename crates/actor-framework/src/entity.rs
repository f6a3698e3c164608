//! # ActorEntity Trait
//!
//! The contract every resource (actor, content item, order, ...) implements to be
//! managed by the generic [`ResourceActor`](crate::ResourceActor). Associated types pin
//! down the id, the DTOs, the actions and the context; lifecycle hooks let an entity
//! validate itself or talk to other actors before a change is committed.
//!
//! # Partitions
//! Every entity reports a [`Partition`](ActorEntity::Partition) key. The actor keeps a
//! secondary index on it so "all pending content" or "all distributors" is a lookup
//! instead of a scan. Entities with no natural grouping use `()`.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::conflicts_with`]
//!
//! The defaults accept everything.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// Hooks run inside the owning actor's task and receive the injected `Context`, so
/// an entity may call other actors (e.g. an order reserving product stock) while the
/// change is still uncommitted.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier. Ordered so listings come back in a stable order.
    type Id: Ord + Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Secondary index key (type, state, status...).
    type Partition: Eq + Hash + Clone + Send + Sync + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `ReserveStock`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// Domain error returned by hooks and constructors.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Produces the id for the `sequence`-th entity created through `create`.
    fn assign_id(sequence: u32) -> Self::Id;

    fn id(&self) -> &Self::Id;

    fn partition(&self) -> Self::Partition;

    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Uniqueness rule beyond the id (e.g. one account per email).
    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }

    // --- Lifecycle Hooks (Async) ---

    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
