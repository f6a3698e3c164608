use crate::model::{ActorId, ParticipationId, ParticipationRole};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventAction {
    Register {
        actor_id: ActorId,
        role: ParticipationRole,
    },
    Unregister(ActorId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventActionResult {
    Registered(ParticipationId),
    /// Whether a participation was removed.
    Unregistered(bool),
}
