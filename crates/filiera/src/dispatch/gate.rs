//! Permission checks in front of a handler.

use super::{CommandError, Handler, Reply, Request};
use crate::model::PermissionSet;
use crate::session::SessionState;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Runs the inner handler only if the session holds every `required` permission.
pub struct AuthorizationGate<H> {
    inner: H,
    required: PermissionSet,
    free_access: bool,
}

impl<H: Handler> AuthorizationGate<H> {
    pub fn new(inner: H, required: PermissionSet) -> Self {
        Self {
            inner,
            required,
            free_access: false,
        }
    }

    /// Approves every request. For local testing only.
    pub fn with_free_access(mut self, free_access: bool) -> Self {
        self.free_access = free_access;
        self
    }

    pub fn required(&self) -> &PermissionSet {
        &self.required
    }
}

#[async_trait]
impl<H: Handler> Handler for AuthorizationGate<H> {
    async fn handle(
        &self,
        session: &mut SessionState,
        request: &Request,
    ) -> Result<Reply, CommandError> {
        if self.free_access {
            debug!(command = %request.method, "Free access: authorization skipped");
            return self.inner.handle(session, request).await;
        }

        let held = session.permissions();
        if !held.is_superset(&self.required) {
            warn!(
                command = %request.method,
                user = session.current().map(|identity| identity.name.as_str()).unwrap_or("none"),
                "Authorization denied"
            );
            return Err(CommandError::Unauthorized {
                command: request.method.clone(),
                missing: held.missing(&self.required),
            });
        }
        self.inner.handle(session, request).await
    }
}
