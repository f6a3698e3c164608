//! # Actor Store Client
//!
//! Registration, lookup and lifecycle of marketplace actors.
use crate::actor_store::{ActorAction, ActorError};
use crate::model::{Actor, ActorCreate, ActorId, ActorPatch, ActorType};
use actor_framework::ActorClient;
use std::collections::HashMap;
use tracing::{debug, instrument};

resource_client!(
    /// Client for the actor store.
    ActorStore => Actor, ActorError
);

impl ActorStore {
    /// Stores `actor` under its own id. Fails with `Conflict` if the id is taken.
    #[instrument(skip(self, actor), fields(id = %actor.id()))]
    pub async fn register(&self, actor: Actor) -> Result<ActorId, ActorError> {
        debug!("Sending request");
        self.inner.insert(actor).await.map_err(Self::map_error)
    }

    /// Builds and stores an actor with a generated id.
    #[instrument(skip(self))]
    pub async fn create(&self, params: ActorCreate) -> Result<ActorId, ActorError> {
        self.inner.create(params).await.map_err(Self::map_error)
    }

    pub async fn find_by_id(&self, id: &ActorId) -> Result<Option<Actor>, ActorError> {
        self.get(id.clone()).await
    }

    /// Case-insensitive email lookup.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Actor>, ActorError> {
        let wanted = email.trim().to_lowercase();
        let found = self
            .inner
            .query(move |actor: &Actor| actor.email() == wanted)
            .await
            .map_err(Self::map_error)?;
        Ok(found.into_iter().next())
    }

    /// Replaces the stored actor with the same id, re-indexing it if its type changed.
    #[instrument(skip(self, actor), fields(id = %actor.id()))]
    pub async fn update(&self, actor: Actor) -> Result<Actor, ActorError> {
        self.inner.replace(actor).await.map_err(Self::map_error)
    }

    /// Applies a partial change through the validating setters.
    #[instrument(skip(self))]
    pub async fn patch(&self, id: ActorId, patch: ActorPatch) -> Result<Actor, ActorError> {
        self.inner.update(id, patch).await.map_err(Self::map_error)
    }

    pub async fn remove(&self, id: ActorId) -> Result<(), ActorError> {
        self.delete(id).await
    }

    /// Returns whether the actor was inactive.
    #[instrument(skip(self))]
    pub async fn activate(&self, id: ActorId) -> Result<bool, ActorError> {
        self.inner
            .perform_action(id, ActorAction::Activate)
            .await
            .map_err(Self::map_error)
    }

    /// Returns whether the actor was active.
    #[instrument(skip(self))]
    pub async fn deactivate(&self, id: ActorId) -> Result<bool, ActorError> {
        self.inner
            .perform_action(id, ActorAction::Deactivate)
            .await
            .map_err(Self::map_error)
    }

    pub async fn list_by_type(&self, actor_type: ActorType) -> Result<Vec<Actor>, ActorError> {
        self.inner
            .list_partition(actor_type)
            .await
            .map_err(Self::map_error)
    }

    pub async fn list_active_by_type(
        &self,
        actor_type: ActorType,
    ) -> Result<Vec<Actor>, ActorError> {
        let mut actors = self.list_by_type(actor_type).await?;
        actors.retain(Actor::is_active);
        Ok(actors)
    }

    /// Case-insensitive substring match on the display name.
    #[instrument(skip(self))]
    pub async fn search(&self, name_pattern: &str) -> Result<Vec<Actor>, ActorError> {
        let term = name_pattern.trim().to_lowercase();
        if term.is_empty() {
            return Err(ActorError::ValidationError(
                "search term cannot be empty".into(),
            ));
        }
        self.inner
            .query(move |actor: &Actor| actor.name().to_lowercase().contains(&term))
            .await
            .map_err(Self::map_error)
    }

    pub async fn count_by_type(&self) -> Result<HashMap<ActorType, usize>, ActorError> {
        self.census().await
    }

    /// The active actor registered under `email`.
    #[instrument(skip(self))]
    pub async fn authenticate(&self, email: &str) -> Result<Actor, ActorError> {
        match self.find_by_email(email).await? {
            Some(actor) if actor.is_active() => Ok(actor),
            _ => Err(ActorError::NotFound(format!("no active actor for {email}"))),
        }
    }
}
