use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;
use std::collections::HashMap;

/// Trait for resource-specific clients to inherit standard operations.
///
/// Implementors only provide access to the inner [`ResourceClient`]; errors are mapped
/// through the domain error's `From<FrameworkError>`, which is expected to recover the
/// typed error carried by [`FrameworkError::EntityError`].
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<FrameworkError> + From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    fn map_error(e: FrameworkError) -> Self::Error {
        Self::Error::from(e)
    }

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch an entity by ID, failing with `NotFound` when absent.
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, id: T::Id) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        let key = id.to_string();
        self.inner()
            .get(id)
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| Self::map_error(FrameworkError::NotFound(key)))
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    async fn list_all(&self) -> Result<Vec<T>, Self::Error> {
        self.inner().list_all().await.map_err(Self::map_error)
    }

    async fn census(&self) -> Result<HashMap<T::Partition, usize>, Self::Error> {
        self.inner().census().await.map_err(Self::map_error)
    }
}
