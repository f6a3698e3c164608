//! # Filiera
//!
//! An agricultural supply-chain marketplace on the resource-actor framework. Producers,
//! distributors, curators, animators and buyers are registered in the [`actor_store`];
//! content goes through moderation; products, orders, events, packages and supply chains
//! each live in their own actor.
//!
//! - [`model`]: plain data and typed ids
//! - `*_actor` modules: the [`ActorEntity`](actor_framework::ActorEntity) implementations
//! - [`clients`]: typed clients over each actor
//! - [`registry`]: prototype templates for user accounts
//! - [`session`] / [`dispatch`]: the textual command protocol and its authorization gates
//! - [`codec`]: persisted column formats
//! - [`lifecycle`]: configuration, system wiring and shutdown

#[macro_use]
mod macros;

pub mod actor_store;
pub mod clients;
pub mod codec;
pub mod content_actor;
pub mod dispatch;
pub mod event_actor;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod package_actor;
pub mod product_actor;
pub mod registry;
pub mod session;
pub mod supply_chain_actor;
pub mod user_actor;
