//! Entity trait implementation for the Event domain type.

use super::actions::{EventAction, EventActionResult};
use super::error::EventError;
use crate::actor_store::ActorError;
use crate::clients::ActorStore;
use crate::model::{
    non_blank, ActorId, ActorType, Event, EventCreate, EventId, Participation, ParticipationId,
    ParticipationRole,
};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::{Datelike, Utc};
use tracing::info;

/// Events cannot be scheduled before this year.
pub const FIRST_EVENT_YEAR: i32 = 2025;

fn lookup(e: ActorError) -> EventError {
    EventError::ActorCommunicationError(e.to_string())
}

impl Event {
    fn register(
        &mut self,
        actor_id: ActorId,
        role: ParticipationRole,
    ) -> Result<ParticipationId, EventError> {
        if self.participant(&actor_id).is_some() {
            return Err(EventError::AlreadyRegistered {
                event: self.id,
                actor: actor_id,
            });
        }
        self.next_participation += 1;
        let id = ParticipationId(self.next_participation);
        self.participations.push(Participation {
            id,
            actor_id,
            role,
            registered_at: Utc::now(),
        });
        Ok(id)
    }

    fn unregister(&mut self, actor_id: &ActorId) -> bool {
        let before = self.participations.len();
        self.participations.retain(|p| &p.actor_id != actor_id);
        self.participations.len() != before
    }
}

#[async_trait]
impl ActorEntity for Event {
    type Id = EventId;
    /// Organizer.
    type Partition = ActorId;
    type Create = EventCreate;
    type Update = ();
    type Action = EventAction;
    type ActionResult = EventActionResult;
    type Context = ActorStore;
    type Error = EventError;

    fn assign_id(sequence: u32) -> EventId {
        EventId(sequence)
    }

    fn id(&self) -> &EventId {
        &self.id
    }

    fn partition(&self) -> ActorId {
        self.organizer_id.clone()
    }

    fn from_create_params(id: EventId, params: EventCreate) -> Result<Self, EventError> {
        let required = |value: &str, field: &str| {
            non_blank(value)
                .ok_or_else(|| EventError::ValidationError(format!("{field} cannot be blank")))
        };
        if params.starts_at.year() < FIRST_EVENT_YEAR {
            return Err(EventError::ValidationError(format!(
                "events cannot start before {FIRST_EVENT_YEAR}, got {}",
                params.starts_at
            )));
        }
        Ok(Self {
            id,
            title: required(&params.title, "title")?,
            description: params.description.trim().to_string(),
            starts_at: params.starts_at,
            location: required(&params.location, "location")?,
            organizer_id: params.organizer_id,
            participations: Vec::new(),
            next_participation: 0,
        })
    }

    async fn on_create(&mut self, actors: &ActorStore) -> Result<(), EventError> {
        let organizer = actors
            .find_by_id(&self.organizer_id)
            .await
            .map_err(lookup)?
            .ok_or_else(|| {
                EventError::InvalidOrganizer(format!("{} not found", self.organizer_id))
            })?;
        if organizer.actor_type() != ActorType::Animator {
            return Err(EventError::InvalidOrganizer(format!(
                "{} is a {}, not an animator",
                self.organizer_id,
                organizer.actor_type()
            )));
        }
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &ActorStore) -> Result<(), EventError> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: EventAction,
        actors: &ActorStore,
    ) -> Result<EventActionResult, EventError> {
        match action {
            EventAction::Register { actor_id, role } => {
                if self.participant(&actor_id).is_some() {
                    return Err(EventError::AlreadyRegistered {
                        event: self.id,
                        actor: actor_id,
                    });
                }
                match actors.find_by_id(&actor_id).await.map_err(lookup)? {
                    Some(actor) if actor.is_active() => {}
                    Some(_) => {
                        return Err(EventError::InvalidParticipant(format!(
                            "{actor_id} is inactive"
                        )))
                    }
                    None => {
                        return Err(EventError::InvalidParticipant(format!(
                            "{actor_id} not found"
                        )))
                    }
                }
                let id = self.register(actor_id, role)?;
                info!(event = %self.id, participation = %id, "Participant registered");
                Ok(EventActionResult::Registered(id))
            }
            EventAction::Unregister(actor_id) => {
                Ok(EventActionResult::Unregistered(self.unregister(&actor_id)))
            }
        }
    }
}
