//! # ResourceClient
//!
//! A cheap, cloneable handle to a [`ResourceActor`](crate::ResourceActor). Every method
//! sends one [`ResourceRequest`] and awaits the oneshot reply. A closed mailbox is
//! reported as [`FrameworkError::ActorClosed`], a dropped reply as
//! [`FrameworkError::ActorDropped`].

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};

#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Creates an entity with an actor-assigned id.
    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    /// Stores an entity that already carries its id.
    pub async fn insert(&self, entity: T) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Insert { entity, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    /// Replaces the stored entity with the same id.
    pub async fn replace(&self, entity: T) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Replace { entity, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Returns every entity matching `filter`, in id order.
    pub async fn query<F>(&self, filter: F) -> Result<Vec<T>, FrameworkError>
    where
        F: Fn(&T) -> bool + Send + 'static,
    {
        self.request(|respond_to| ResourceRequest::Query {
            filter: Box::new(filter),
            respond_to,
        })
        .await
    }

    pub async fn list_all(&self) -> Result<Vec<T>, FrameworkError> {
        self.query(|_| true).await
    }

    /// Returns every entity indexed under `key`, in id order.
    pub async fn list_partition(&self, key: T::Partition) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Partition { key, respond_to })
            .await
    }

    /// Number of entities per non-empty partition.
    pub async fn census(&self) -> Result<HashMap<T::Partition, usize>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Census { respond_to })
            .await
    }
}
