//! # Supply Chain Client
use crate::model::{ProductId, SupplyChain, SupplyChainCreate, SupplyChainId, SupplyChainPoint};
use crate::supply_chain_actor::{SupplyChainAction, SupplyChainError};
use actor_framework::ActorClient;
use tracing::{debug, instrument};

resource_client!(
    /// Client for interacting with the Supply Chain actor.
    SupplyChain, SupplyChainError
);

impl SupplyChainClient {
    #[instrument(skip(self))]
    pub async fn create_supply_chain(
        &self,
        params: SupplyChainCreate,
    ) -> Result<SupplyChainId, SupplyChainError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    async fn act(
        &self,
        id: SupplyChainId,
        action: SupplyChainAction,
    ) -> Result<bool, SupplyChainError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    /// Links an existing product. `false` if it was already linked.
    #[instrument(skip(self))]
    pub async fn add_product(
        &self,
        id: SupplyChainId,
        product: ProductId,
    ) -> Result<bool, SupplyChainError> {
        self.act(id, SupplyChainAction::AddProduct(product)).await
    }

    #[instrument(skip(self))]
    pub async fn remove_product(
        &self,
        id: SupplyChainId,
        product: ProductId,
    ) -> Result<bool, SupplyChainError> {
        self.act(id, SupplyChainAction::RemoveProduct(product)).await
    }

    #[instrument(skip(self))]
    pub async fn add_point(
        &self,
        id: SupplyChainId,
        point: SupplyChainPoint,
    ) -> Result<bool, SupplyChainError> {
        self.act(id, SupplyChainAction::AddPoint(point)).await
    }

    /// Case-insensitive substring match on the name.
    pub async fn find_by_name(&self, term: &str) -> Result<Vec<SupplyChain>, SupplyChainError> {
        let term = term.trim().to_lowercase();
        self.inner
            .query(move |chain: &SupplyChain| chain.name.to_lowercase().contains(&term))
            .await
            .map_err(Self::map_error)
    }

    pub async fn list_by_area(&self, area: &str) -> Result<Vec<SupplyChain>, SupplyChainError> {
        self.inner
            .list_partition(area.trim().to_lowercase())
            .await
            .map_err(Self::map_error)
    }

    pub async fn containing_product(
        &self,
        product: ProductId,
    ) -> Result<Vec<SupplyChain>, SupplyChainError> {
        self.inner
            .query(move |chain: &SupplyChain| chain.products.contains(&product))
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
    async fn test_area_lookup_uses_the_lowercased_key() {
        let mut mock = MockClient::<SupplyChain>::new();
        mock.expect_partition("langhe".to_string()).return_ok(vec![]);
        let chains = SupplyChainClient::new(mock.client());

        assert!(chains.list_by_area("  Langhe ").await.unwrap().is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn test_remove_product_reports_whether_it_was_linked() {
        let mut mock = MockClient::<SupplyChain>::new();
        mock.expect_action(SupplyChainId(1)).return_ok(true);
        mock.expect_action(SupplyChainId(1)).return_ok(false);
        mock.expect_action(SupplyChainId(2))
            .return_err(FrameworkError::NotFound("chain_2".into()));
        let chains = SupplyChainClient::new(mock.client());

        assert_eq!(chains.remove_product(SupplyChainId(1), ProductId(3)).await, Ok(true));
        assert_eq!(chains.remove_product(SupplyChainId(1), ProductId(3)).await, Ok(false));
        assert_eq!(
            chains.remove_product(SupplyChainId(2), ProductId(3)).await,
            Err(SupplyChainError::NotFound("chain_2".into()))
        );
        mock.verify();
    }
}
