use super::actions::SupplyChainAction;
use super::error::SupplyChainError;
use crate::clients::ProductClient;
use crate::model::{non_blank, SupplyChain, SupplyChainCreate, SupplyChainId};
use actor_framework::{ActorClient, ActorEntity};
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl ActorEntity for SupplyChain {
    type Id = SupplyChainId;
    /// Lower-cased territorial area.
    type Partition = String;
    type Create = SupplyChainCreate;
    type Update = ();
    type Action = SupplyChainAction;
    type ActionResult = bool;
    type Context = ProductClient;
    type Error = SupplyChainError;

    fn assign_id(sequence: u32) -> SupplyChainId {
        SupplyChainId(sequence)
    }

    fn id(&self) -> &SupplyChainId {
        &self.id
    }

    fn partition(&self) -> String {
        self.territorial_area.to_lowercase()
    }

    fn from_create_params(
        id: SupplyChainId,
        params: SupplyChainCreate,
    ) -> Result<Self, SupplyChainError> {
        let required = |value: &str, field: &str| {
            non_blank(value).ok_or_else(|| {
                SupplyChainError::ValidationError(format!("{field} cannot be blank"))
            })
        };
        Ok(Self {
            id,
            name: required(&params.name, "name")?,
            description: params.description.trim().to_string(),
            territorial_area: required(&params.territorial_area, "territorial area")?,
            products: Vec::new(),
            points: params.points,
            created_at: Utc::now(),
        })
    }

    async fn on_update(
        &mut self,
        _update: (),
        _ctx: &ProductClient,
    ) -> Result<(), SupplyChainError> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: SupplyChainAction,
        products: &ProductClient,
    ) -> Result<bool, SupplyChainError> {
        match action {
            SupplyChainAction::AddProduct(product) => {
                if self.products.contains(&product) {
                    return Ok(false);
                }
                products
                    .get(product)
                    .await
                    .map_err(|e| SupplyChainError::ActorCommunicationError(e.to_string()))?
                    .ok_or_else(|| SupplyChainError::UnknownProduct(product.to_string()))?;
                self.products.push(product);
                Ok(true)
            }
            SupplyChainAction::RemoveProduct(product) => {
                let before = self.products.len();
                self.products.retain(|p| *p != product);
                Ok(self.products.len() != before)
            }
            SupplyChainAction::AddPoint(point) => {
                if self.points.contains(&point) {
                    return Ok(false);
                }
                self.points.push(point);
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Product, ProductId, SupplyChainPoint};
    use actor_framework::mock::MockClient;

    fn chain() -> SupplyChain {
        SupplyChain::from_create_params(
            SupplyChainId(1),
            SupplyChainCreate {
                name: "Olio del Garda".into(),
                description: String::new(),
                territorial_area: "Garda".into(),
                points: vec![SupplyChainPoint::new(45.6, 10.7).unwrap()],
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_point_is_not_added() {
        let products = ProductClient::new(MockClient::<Product>::new().client());
        let mut chain = chain();
        let point = SupplyChainPoint::new(45.6, 10.7).unwrap();

        assert!(!chain
            .handle_action(SupplyChainAction::AddPoint(point), &products)
            .await
            .unwrap());
        assert_eq!(chain.points.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_product_is_rejected() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_get(ProductId(3)).return_ok(None);
        let products = ProductClient::new(mock.client());
        let mut chain = chain();

        let err = chain
            .handle_action(SupplyChainAction::AddProduct(ProductId(3)), &products)
            .await
            .unwrap_err();
        assert_eq!(err, SupplyChainError::UnknownProduct("product_3".into()));
        assert!(chain.products.is_empty());
        mock.verify();
    }

    #[test]
    fn test_blank_area_is_rejected() {
        let params = SupplyChainCreate {
            name: "x".into(),
            description: String::new(),
            territorial_area: " ".into(),
            points: vec![],
        };
        assert!(SupplyChain::from_create_params(SupplyChainId(1), params).is_err());
    }
}
