use crate::actor_store::ActorError;
use crate::content_actor::ContentError;
use crate::event_actor::EventError;
use crate::model::Permission;
use crate::order_actor::OrderError;
use crate::package_actor::PackageError;
use crate::product_actor::ProductError;
use crate::session::SessionError;
use crate::supply_chain_actor::SupplyChainError;
use crate::user_actor::UserError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Empty request")]
    Empty,
}

fn join(permissions: &[Permission]) -> String {
    permissions
        .iter()
        .map(Permission::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Why a command line could not be served.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command} expects: {usage}")]
    MissingParameters { command: String, usage: &'static str },

    #[error("Invalid {name} {value:?}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{command} requires permissions [{}]", join(.missing))]
    Unauthorized {
        command: String,
        missing: Vec<Permission>,
    },

    #[error("{0} requires a logged in user")]
    NotLoggedIn(String),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Actor(#[from] ActorError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Event(#[from] EventError),

    #[error(transparent)]
    Package(#[from] PackageError),

    #[error(transparent)]
    SupplyChain(#[from] SupplyChainError),
}
