//! # Actor Framework
//!
//! Building blocks for type-safe actor systems on tokio, following a
//! **Resource-Oriented Architecture**: every resource type gets one actor that owns its
//! state and exposes a uniform create / insert / get / update / replace / delete / action
//! API plus filtered and partitioned listings.
//!
//! - Isolated state (no shared memory, no locks)
//! - Message-passing concurrency over bounded mpsc channels
//! - Sequential processing within each actor, so every request is atomic
//!
//! Resources that need each other (an order reserving product stock) receive the other
//! resource's client through their `Context`, injected at [`ResourceActor::run`] time.
//!
//! ## Modules
//!
//! - [`entity`]: the [`ActorEntity`] contract
//! - [`actor`]: the generic [`ResourceActor`]
//! - [`client`] / [`client_trait`]: [`ResourceClient`] and the [`ActorClient`] helper trait
//! - [`mock`]: [`mock::MockClient`] for tests
//! - [`tracing`]: [`tracing::setup_tracing`]

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
