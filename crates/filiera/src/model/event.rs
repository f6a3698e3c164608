//! Events organised by animators (fairs, tastings, farm visits) and the actors taking
//! part in them.

use crate::model::{ActorId, EventId, ParticipationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipationRole {
    Visitor,
    Exhibitor,
    Speaker,
}

impl FromStr for ParticipationRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "visitor" => Ok(ParticipationRole::Visitor),
            "exhibitor" => Ok(ParticipationRole::Exhibitor),
            "speaker" => Ok(ParticipationRole::Speaker),
            other => Err(format!("unknown participation role: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participation {
    pub id: ParticipationId,
    pub actor_id: ActorId,
    pub role: ParticipationRole,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub location: String,
    pub organizer_id: ActorId,
    pub participations: Vec<Participation>,
    pub(crate) next_participation: u32,
}

impl Event {
    pub fn participant(&self, actor_id: &ActorId) -> Option<&Participation> {
        self.participations.iter().find(|p| &p.actor_id == actor_id)
    }
}

/// Payload for creating an event.
#[derive(Debug, Clone)]
pub struct EventCreate {
    pub title: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub location: String,
    pub organizer_id: ActorId,
}
