//! # Content Entity Implementation
//!
//! The moderation state machine:
//!
//! | from \ action | Approve | Reject |
//! |---------------|---------|--------|
//! | Pending | Approved, `true` | Rejected, `true` |
//! | Approved | `false` | `InvalidTransition` |
//! | Rejected | `InvalidTransition` | `false` |

use super::actions::ContentAction;
use super::error::ContentError;
use crate::model::{non_blank, ContentId, ContentItem, ContentState, ContentSubmission};
use actor_framework::ActorEntity;
use async_trait::async_trait;

impl ContentItem {
    /// Moves the item to `target`. Returns `false` if it was already there.
    pub(crate) fn transition(&mut self, target: ContentState) -> Result<bool, ContentError> {
        match self.state {
            current if current == target => Ok(false),
            ContentState::Pending => {
                self.state = target;
                Ok(true)
            }
            current => Err(ContentError::InvalidTransition {
                from: current,
                to: target,
            }),
        }
    }
}

#[async_trait]
impl ActorEntity for ContentItem {
    type Id = ContentId;
    type Partition = ContentState;
    type Create = ContentSubmission;
    type Update = ();
    type Action = ContentAction;
    type ActionResult = bool;
    type Context = ();
    type Error = ContentError;

    fn assign_id(sequence: u32) -> ContentId {
        ContentId(sequence)
    }

    fn id(&self) -> &ContentId {
        &self.id
    }

    fn partition(&self) -> ContentState {
        self.state
    }

    fn from_create_params(id: ContentId, params: ContentSubmission) -> Result<Self, ContentError> {
        let required = |value: &str, field: &str| {
            non_blank(value)
                .ok_or_else(|| ContentError::ValidationError(format!("{field} cannot be blank")))
        };
        Ok(Self {
            id,
            name: required(&params.name, "name")?,
            description: required(&params.description, "description")?,
            kind: params.kind,
            submitted_by: params.submitted_by.as_deref().and_then(non_blank),
            state: ContentState::Pending,
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), ContentError> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ContentAction,
        _ctx: &(),
    ) -> Result<bool, ContentError> {
        match action {
            ContentAction::Approve => self.transition(ContentState::Approved),
            ContentAction::Reject => self.transition(ContentState::Rejected),
        }
    }
}
