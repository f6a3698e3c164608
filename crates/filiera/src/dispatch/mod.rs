//! # Action Dispatcher
//!
//! Textual commands (`method param param ...`) are routed to registered [`Handler`]s.
//! Handlers receive the caller's [`SessionState`] explicitly, so one dispatcher can
//! serve any number of request loops.
//!
//! Commands that need permissions are registered wrapped in an [`AuthorizationGate`].
//!
//! ```rust,ignore
//! let mut dispatcher = ActionDispatcher::new();
//! dispatcher.register("whoami", WhoAmI);
//! dispatcher.register(
//!     "approve_content",
//!     AuthorizationGate::new(Moderate::approve(content), PermissionSet::of(["content_curate"])),
//! );
//!
//! let mut session = SessionState::new();
//! let reply = dispatcher.dispatch_line(&mut session, "approve_content 3").await?;
//! ```

pub mod error;
pub mod gate;
pub mod handlers;
pub mod reply;

pub use error::*;
pub use gate::AuthorizationGate;
pub use reply::Reply;

use crate::session::SessionState;
use async_trait::async_trait;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub params: Vec<String>,
}

impl Request {
    /// Splits `line` on whitespace; the first token is the method.
    pub fn parse(line: &str) -> Result<Self, RequestError> {
        let mut tokens = line.split_whitespace().map(str::to_string);
        let method = tokens.next().ok_or(RequestError::Empty)?;
        Ok(Self {
            method,
            params: tokens.collect(),
        })
    }

    /// The `index`-th parameter, or `MissingParameters` with the command's usage.
    pub fn param(&self, index: usize, usage: &'static str) -> Result<&str, CommandError> {
        self.params
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| CommandError::MissingParameters {
                command: self.method.clone(),
                usage,
            })
    }

    /// Parses the `index`-th parameter.
    pub fn parse_param<T>(
        &self,
        index: usize,
        name: &'static str,
        usage: &'static str,
    ) -> Result<T, CommandError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.param(index, usage)?;
        raw.parse().map_err(|e: T::Err| CommandError::InvalidParameter {
            name,
            value: raw.to_string(),
            reason: e.to_string(),
        })
    }

    /// Parameters from `index` on, joined with single spaces (free text).
    pub fn text_from(&self, index: usize, usage: &'static str) -> Result<String, CommandError> {
        self.param(index, usage)?;
        Ok(self.params[index..].join(" "))
    }
}

impl FromStr for Request {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Serves one command.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(
        &self,
        session: &mut SessionState,
        request: &Request,
    ) -> Result<Reply, CommandError>;
}

#[derive(Default, Clone)]
pub struct ActionDispatcher {
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `handler` to `command`, returning the handler it replaced.
    pub fn register(
        &mut self,
        command: &str,
        handler: impl Handler + 'static,
    ) -> Option<Arc<dyn Handler>> {
        self.handlers.insert(command.to_string(), Arc::new(handler))
    }

    /// Registered command names, sorted.
    pub fn commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub async fn dispatch(
        &self,
        session: &mut SessionState,
        request: &Request,
    ) -> Result<Reply, CommandError> {
        let Some(handler) = self.handlers.get(&request.method) else {
            warn!(command = %request.method, "Unknown command");
            return Err(CommandError::UnknownCommand(request.method.clone()));
        };
        debug!(command = %request.method, params = request.params.len(), "Dispatching");
        handler.handle(session, request).await
    }

    /// Parses `line` and dispatches it.
    pub async fn dispatch_line(
        &self,
        session: &mut SessionState,
        line: &str,
    ) -> Result<Reply, CommandError> {
        let request = Request::parse(line)?;
        self.dispatch(session, &request).await
    }
}
