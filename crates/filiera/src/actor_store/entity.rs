//! # Actor Entity Implementation
//!
//! Actors are indexed by [`ActorType`], so changing an actor's kind moves it to the
//! new type's index on commit. Identity conflicts are by id only; two actors may share
//! a display name.

use super::actions::ActorAction;
use super::error::ActorError;
use crate::model::{Actor, ActorCreate, ActorId, ActorPatch, ActorType};
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Actor {
    type Id = ActorId;
    type Partition = ActorType;
    type Create = ActorCreate;
    type Update = ActorPatch;
    type Action = ActorAction;
    type ActionResult = bool;
    type Context = ();
    type Error = ActorError;

    fn assign_id(_sequence: u32) -> ActorId {
        ActorId::generate()
    }

    fn id(&self) -> &ActorId {
        Actor::id(self)
    }

    fn partition(&self) -> ActorType {
        self.actor_type()
    }

    fn from_create_params(id: ActorId, params: ActorCreate) -> Result<Self, ActorError> {
        Ok(Actor::new(&params.name, &params.email, params.kind)?.with_id(id))
    }

    /// Applies every present field through the validating setters.
    async fn on_update(&mut self, patch: ActorPatch, _ctx: &()) -> Result<(), ActorError> {
        if let Some(name) = patch.name {
            self.set_name(&name)?;
        }
        if let Some(email) = patch.email {
            self.set_email(&email)?;
        }
        if let Some(phone) = patch.phone {
            self.set_phone(&phone);
        }
        if let Some(address) = patch.address {
            self.set_address(&address);
        }
        if let Some(kind) = patch.kind {
            self.set_kind(kind)?;
        }
        Ok(())
    }

    /// Returns whether the active flag changed.
    async fn handle_action(&mut self, action: ActorAction, _ctx: &()) -> Result<bool, ActorError> {
        Ok(match action {
            ActorAction::Activate => self.set_active(true),
            ActorAction::Deactivate => self.set_active(false),
        })
    }
}
