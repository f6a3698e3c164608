//! # System Lifecycle
//!
//! Wiring the marketplace together: configuration, the running actors and the command
//! dispatcher on top of them.
//!
//! 1. [`Config::from_env`] reads the `FILIERA_*` variables.
//! 2. [`MarketplaceSystem::new`] creates every actor, then starts each one with its
//!    dependencies injected through `run(context)`. The dependency graph is acyclic, so
//!    dropping the clients shuts everything down.
//! 3. [`configure_dispatcher`] installs the command table, wrapping privileged commands
//!    in an [`AuthorizationGate`](crate::dispatch::AuthorizationGate).
//!
//! Logging is set up by the binary through [`setup_tracing`].

pub mod config;
pub mod configurator;
pub mod system;

pub use actor_framework::tracing::{setup_tracing, LogFormat};
pub use config::*;
pub use configurator::*;
pub use system::*;
