//! # Event Client
use crate::event_actor::{EventAction, EventActionResult, EventError};
use crate::model::{ActorId, Event, EventCreate, EventId, ParticipationId, ParticipationRole};
use actor_framework::ActorClient;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

resource_client!(
    /// Client for interacting with the Event actor.
    Event, EventError
);

impl EventClient {
    /// Creates an event. The organizer must be a registered animator.
    #[instrument(skip(self))]
    pub async fn create_event(&self, params: EventCreate) -> Result<EventId, EventError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn register_participant(
        &self,
        event: EventId,
        actor_id: ActorId,
        role: ParticipationRole,
    ) -> Result<ParticipationId, EventError> {
        match self
            .inner
            .perform_action(event, EventAction::Register { actor_id, role })
            .await
            .map_err(Self::map_error)?
        {
            EventActionResult::Registered(id) => Ok(id),
            other => Err(EventError::ActorCommunicationError(format!(
                "unexpected action result {other:?}"
            ))),
        }
    }

    /// Returns whether a participation was removed.
    #[instrument(skip(self))]
    pub async fn unregister_participant(
        &self,
        event: EventId,
        actor_id: ActorId,
    ) -> Result<bool, EventError> {
        match self
            .inner
            .perform_action(event, EventAction::Unregister(actor_id))
            .await
            .map_err(Self::map_error)?
        {
            EventActionResult::Unregistered(removed) => Ok(removed),
            other => Err(EventError::ActorCommunicationError(format!(
                "unexpected action result {other:?}"
            ))),
        }
    }

    pub async fn list_by_organizer(&self, organizer: &ActorId) -> Result<Vec<Event>, EventError> {
        self.inner
            .list_partition(organizer.clone())
            .await
            .map_err(Self::map_error)
    }

    /// Events starting after `now`, soonest first.
    pub async fn upcoming(&self, now: DateTime<Utc>) -> Result<Vec<Event>, EventError> {
        let mut events = self
            .inner
            .query(move |event: &Event| event.starts_at > now)
            .await
            .map_err(Self::map_error)?;
        events.sort_by_key(|event| event.starts_at);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::MockClient;
    use actor_framework::ActorEntity;
    use chrono::TimeZone;

    fn event(id: u32, month: u32) -> Event {
        let params = EventCreate {
            title: format!("fair {id}"),
            description: String::new(),
            starts_at: Utc.with_ymd_and_hms(2027, month, 1, 10, 0, 0).unwrap(),
            location: "Bra".into(),
            organizer_id: ActorId::new("animator").unwrap(),
        };
        Event::from_create_params(EventId(id), params).unwrap()
    }

    #[tokio::test]
    async fn test_upcoming_is_soonest_first() {
        let mut mock = MockClient::<Event>::new();
        mock.expect_query()
            .return_ok(vec![event(1, 11), event(2, 5), event(3, 8)]);
        let events = EventClient::new(mock.client());

        let now = Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap();
        let ids: Vec<_> = events
            .upcoming(now)
            .await
            .unwrap()
            .into_iter()
            .map(|event| event.id)
            .collect();
        assert_eq!(ids, vec![EventId(2), EventId(3), EventId(1)]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_unregister_rejects_a_registration_result() {
        let mut mock = MockClient::<Event>::new();
        mock.expect_action(EventId(1))
            .return_ok(EventActionResult::Unregistered(false));
        mock.expect_action(EventId(1))
            .return_ok(EventActionResult::Registered(ParticipationId(4)));
        let events = EventClient::new(mock.client());
        let visitor = ActorId::new("visitor").unwrap();

        assert_eq!(
            events.unregister_participant(EventId(1), visitor.clone()).await,
            Ok(false)
        );
        assert!(matches!(
            events.unregister_participant(EventId(1), visitor).await,
            Err(EventError::ActorCommunicationError(_))
        ));
        mock.verify();
    }
}
