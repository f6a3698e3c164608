//! # Package Client
use crate::model::{ActorId, PackageCreate, PackageId, ProductId, ProductPackage};
use crate::package_actor::{PackageAction, PackageError};
use actor_framework::ActorClient;
use tracing::{debug, instrument};

resource_client!(
    /// Client for interacting with the Package actor.
    PackageClient => ProductPackage, PackageError
);

impl PackageClient {
    /// Creates a package. The distributor and every product must exist.
    #[instrument(skip(self))]
    pub async fn create_package(&self, params: PackageCreate) -> Result<PackageId, PackageError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn add_product(
        &self,
        id: PackageId,
        product: ProductId,
    ) -> Result<bool, PackageError> {
        self.inner
            .perform_action(id, PackageAction::AddProduct(product))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn remove_product(
        &self,
        id: PackageId,
        product: ProductId,
    ) -> Result<bool, PackageError> {
        self.inner
            .perform_action(id, PackageAction::RemoveProduct(product))
            .await
            .map_err(Self::map_error)
    }

    pub async fn list_by_distributor(
        &self,
        distributor: &ActorId,
    ) -> Result<Vec<ProductPackage>, PackageError> {
        self.inner
            .list_partition(distributor.clone())
            .await
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::MockClient;
    use actor_framework::FrameworkError;

    #[tokio::test]
    async fn test_actions_surface_typed_errors() {
        let mut mock = MockClient::<ProductPackage>::new();
        mock.expect_action(PackageId(1)).return_ok(false);
        mock.expect_action(PackageId(1))
            .return_err(FrameworkError::EntityError(Box::new(
                PackageError::ValidationError("last product".into()),
            )));
        let packages = PackageClient::new(mock.client());

        assert_eq!(packages.add_product(PackageId(1), ProductId(2)).await, Ok(false));
        assert_eq!(
            packages.remove_product(PackageId(1), ProductId(2)).await,
            Err(PackageError::ValidationError("last product".into()))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_list_by_distributor_uses_the_partition() {
        let distributor = ActorId::new("distributor-1").unwrap();
        let mut mock = MockClient::<ProductPackage>::new();
        mock.expect_partition(distributor.clone()).return_ok(vec![]);
        let packages = PackageClient::new(mock.client());

        assert!(packages
            .list_by_distributor(&distributor)
            .await
            .unwrap()
            .is_empty());
        mock.verify();
    }
}
