//! # Resource Messages
//!
//! The request envelope sent from a [`ResourceClient`](crate::ResourceClient) to its
//! [`ResourceActor`](crate::ResourceActor). Each variant carries a oneshot sender the
//! actor answers on.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use std::collections::HashMap;
use tokio::sync::oneshot;

/// A type alias for the response channel.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Predicate evaluated inside the actor against every stored entity.
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send>;

/// Messages sent to a ResourceActor.
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Insert {
        entity: T,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Replace {
        entity: T,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Query {
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
    },
    Partition {
        key: T::Partition,
        respond_to: Response<Vec<T>>,
    },
    Census {
        respond_to: Response<HashMap<T::Partition, usize>>,
    },
}

impl<T: ActorEntity> std::fmt::Debug for ResourceRequest<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create { params, .. } => {
                f.debug_struct("Create").field("params", params).finish()
            }
            Self::Insert { entity, .. } => {
                f.debug_struct("Insert").field("id", entity.id()).finish()
            }
            Self::Get { id, .. } => f.debug_struct("Get").field("id", id).finish(),
            Self::Update { id, update, .. } => f
                .debug_struct("Update")
                .field("id", id)
                .field("update", update)
                .finish(),
            Self::Replace { entity, .. } => {
                f.debug_struct("Replace").field("id", entity.id()).finish()
            }
            Self::Delete { id, .. } => f.debug_struct("Delete").field("id", id).finish(),
            Self::Action { id, action, .. } => f
                .debug_struct("Action")
                .field("id", id)
                .field("action", action)
                .finish(),
            Self::Query { .. } => f.write_str("Query"),
            Self::Partition { key, .. } => f.debug_struct("Partition").field("key", key).finish(),
            Self::Census { .. } => f.write_str("Census"),
        }
    }
}
