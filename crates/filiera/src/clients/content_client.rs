//! # Content Client
//!
//! The moderation service: submit, approve, reject and list by state.
use crate::content_actor::{ContentAction, ContentError};
use crate::model::{ContentId, ContentItem, ContentKind, ContentState, ContentSubmission};
use actor_framework::ActorClient;
use tracing::{debug, instrument};

resource_client!(
    /// Client for interacting with the Content actor.
    ContentClient => ContentItem, ContentError
);

impl ContentClient {
    /// Stores the submission as `Pending` and returns its id.
    #[instrument(skip(self))]
    pub async fn submit(&self, submission: ContentSubmission) -> Result<ContentId, ContentError> {
        debug!("Sending request");
        self.inner.create(submission).await.map_err(Self::map_error)
    }

    /// `true` if the item moved to `Approved`, `false` if it already was.
    #[instrument(skip(self))]
    pub async fn approve(&self, id: ContentId) -> Result<bool, ContentError> {
        self.inner
            .perform_action(id, ContentAction::Approve)
            .await
            .map_err(Self::map_error)
    }

    /// `true` if the item moved to `Rejected`, `false` if it already was.
    #[instrument(skip(self))]
    pub async fn reject(&self, id: ContentId) -> Result<bool, ContentError> {
        self.inner
            .perform_action(id, ContentAction::Reject)
            .await
            .map_err(Self::map_error)
    }

    pub async fn list_by_state(
        &self,
        state: ContentState,
    ) -> Result<Vec<ContentItem>, ContentError> {
        self.inner
            .list_partition(state)
            .await
            .map_err(Self::map_error)
    }

    pub async fn list_approved(&self) -> Result<Vec<ContentItem>, ContentError> {
        self.list_by_state(ContentState::Approved).await
    }

    pub async fn list_pending(&self) -> Result<Vec<ContentItem>, ContentError> {
        self.list_by_state(ContentState::Pending).await
    }

    pub async fn list_rejected(&self) -> Result<Vec<ContentItem>, ContentError> {
        self.list_by_state(ContentState::Rejected).await
    }

    pub async fn remove(&self, id: ContentId) -> Result<(), ContentError> {
        self.delete(id).await
    }

    /// Whether an approved certification named `name` exists.
    #[instrument(skip(self))]
    pub async fn has_certification(&self, name: &str) -> Result<bool, ContentError> {
        let approved = self.list_approved().await?;
        let wanted = name.trim();
        Ok(approved.iter().any(|item| {
            item.kind == ContentKind::Certification && item.name.eq_ignore_ascii_case(wanted)
        }))
    }
}
