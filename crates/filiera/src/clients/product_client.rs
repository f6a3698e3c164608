//! # Product Client
//!
//! Catalog operations plus the stock actions orders depend on.
use crate::model::{ActorId, Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use actor_framework::ActorClient;
use tracing::{debug, instrument};

resource_client!(
    /// Client for interacting with the Product actor.
    Product, ProductError
);

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected action result {result:?}"))
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Returns the quantity available.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Checking stock for product {}", id);
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Takes `quantity` units out of stock and returns what is left.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Reserving {} units for product {}", quantity, id);
        match self
            .inner
            .perform_action(id, ProductAction::ReserveStock(quantity))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::ReserveStock { remaining } => Ok(remaining),
            other => Err(unexpected(other)),
        }
    }

    /// Puts `quantity` units back and returns the new level.
    #[instrument(skip(self))]
    pub async fn restock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        match self
            .inner
            .perform_action(id, ProductAction::Restock(quantity))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::Restock { available } => Ok(available),
            other => Err(unexpected(other)),
        }
    }

    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, ProductError> {
        self.inner
            .list_partition(category.trim().to_lowercase())
            .await
            .map_err(Self::map_error)
    }

    pub async fn list_by_producer(&self, producer: &ActorId) -> Result<Vec<Product>, ProductError> {
        let producer = producer.clone();
        self.inner
            .query(move |product: &Product| product.producer_id == producer)
            .await
            .map_err(Self::map_error)
    }

    /// Case-insensitive substring match on name and description.
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str) -> Result<Vec<Product>, ProductError> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Err(ProductError::ValidationError("search term cannot be empty".into()));
        }
        self.inner
            .query(move |product: &Product| {
                product.name.to_lowercase().contains(&term)
                    || product.description.to_lowercase().contains(&term)
            })
            .await
            .map_err(Self::map_error)
    }
}
