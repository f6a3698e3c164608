//! # User Client
//!
//! Account creation from prototypes, authentication and registration approval.
use crate::model::{Permission, RegistrationState, User, UserCreate, UserId};
use crate::registry::PrototypeRegistry;
use crate::user_actor::{UserAction, UserError};
use actor_framework::{ActorClient, ResourceClient};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
    prototypes: Arc<PrototypeRegistry<User>>,
}

impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>, prototypes: Arc<PrototypeRegistry<User>>) -> Self {
        Self { inner, prototypes }
    }

    pub fn prototypes(&self) -> &PrototypeRegistry<User> {
        &self.prototypes
    }

    /// Creates a pending account holding a copy of `prototype`'s permissions.
    ///
    /// Fails with `Prototype` if the prototype is unknown and `Conflict` if the
    /// (lower-cased) email is already taken.
    #[instrument(skip(self, password))]
    pub async fn create_user(
        &self,
        prototype: &str,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<UserId, UserError> {
        let template = self.prototypes.get_copy(prototype)?;
        let params = UserCreate::from_template(&template, username, password, email);
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(%id, prototype, "User created");
        Ok(id)
    }

    /// Verifies the credentials of an approved account.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, UserError> {
        let wanted = email.trim().to_lowercase();
        let user = self
            .inner
            .query(move |user: &User| user.email == wanted)
            .await
            .map_err(Self::map_error)?
            .into_iter()
            .next()
            .filter(|user| user.verify_password(password))
            .ok_or(UserError::InvalidCredentials)?;

        if !user.is_approved() {
            return Err(UserError::NotApproved(user.email));
        }
        Ok(user)
    }

    /// Returns whether the registration was still pending.
    #[instrument(skip(self))]
    pub async fn approve_registration(&self, id: UserId) -> Result<bool, UserError> {
        self.inner
            .perform_action(id, UserAction::ApproveRegistration)
            .await
            .map_err(Self::map_error)
    }

    pub async fn list_pending_registrations(&self) -> Result<Vec<User>, UserError> {
        self.inner
            .list_partition(RegistrationState::Pending)
            .await
            .map_err(Self::map_error)
    }

    /// Returns whether the permission was newly granted.
    #[instrument(skip(self))]
    pub async fn grant(&self, id: UserId, permission: Permission) -> Result<bool, UserError> {
        self.inner
            .perform_action(id, UserAction::Grant(permission))
            .await
            .map_err(Self::map_error)
    }

    /// Returns whether the permission was held.
    #[instrument(skip(self))]
    pub async fn revoke(&self, id: UserId, permission: Permission) -> Result<bool, UserError> {
        self.inner
            .perform_action(id, UserAction::Revoke(permission))
            .await
            .map_err(Self::map_error)
    }
}
