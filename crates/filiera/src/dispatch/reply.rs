use crate::model::{ContentId, ContentState, EventId, ParticipationId, UserId};
use crate::session::Identity;
use std::fmt;

/// The successful outcome of a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    LoggedIn { name: String },
    Created { resource: &'static str, id: String },
    Moderated {
        id: ContentId,
        state: ContentState,
        changed: bool,
    },
    RegistrationApproved { id: UserId, changed: bool },
    Participating {
        event: EventId,
        participation: ParticipationId,
    },
    WhoAmI(Option<Identity>),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::LoggedIn { name } => write!(f, "logged in as {name}"),
            Reply::Created { resource, id } => write!(f, "{resource} created: {id}"),
            Reply::Moderated { id, state, changed: true } => write!(f, "{id} {state}"),
            Reply::Moderated { id, state, changed: false } => write!(f, "{id} already {state}"),
            Reply::RegistrationApproved { id, changed: true } => {
                write!(f, "registration of {id} approved")
            }
            Reply::RegistrationApproved { id, changed: false } => {
                write!(f, "registration of {id} was already approved")
            }
            Reply::Participating {
                event,
                participation,
            } => write!(f, "registered for {event} as {participation}"),
            Reply::WhoAmI(Some(identity)) => {
                write!(f, "{} {}", identity.name, identity.permissions)
            }
            Reply::WhoAmI(None) => f.write_str("nobody is logged in"),
        }
    }
}
