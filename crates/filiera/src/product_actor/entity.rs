//! Entity trait implementation for the Product domain type.
//!
//! Validation on create: name and category are required, the price is non-negative and
//! the production date is not in the future.

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::model::{non_blank, non_negative, Product, ProductCreate, ProductId, ProductUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

fn required(value: &str, field: &str) -> Result<String, ProductError> {
    non_blank(value)
        .ok_or_else(|| ProductError::ValidationError(format!("{field} cannot be blank")))
}

fn valid_price(price: f64) -> Result<f64, ProductError> {
    if non_negative(price) {
        Ok(price)
    } else {
        Err(ProductError::ValidationError(format!(
            "price must be non-negative, got {price}"
        )))
    }
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    /// Lower-cased category.
    type Partition = String;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn assign_id(sequence: u32) -> ProductId {
        ProductId(sequence)
    }

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn partition(&self) -> String {
        self.category.to_lowercase()
    }

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        if params.production_date > Utc::now().date_naive() {
            return Err(ProductError::ValidationError(format!(
                "production date {} is in the future",
                params.production_date
            )));
        }
        Ok(Self {
            id,
            name: required(&params.name, "name")?,
            category: required(&params.category, "category")?,
            description: params.description.trim().to_string(),
            cultivation_method: params.cultivation_method.as_deref().and_then(non_blank),
            certifications: params
                .certifications
                .iter()
                .filter_map(|c| non_blank(c))
                .collect(),
            production_date: params.production_date,
            producer_id: params.producer_id,
            price: valid_price(params.price)?,
            quantity: params.quantity,
        })
    }

    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), ProductError> {
        if let Some(price) = update.price {
            self.price = valid_price(price)?;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(description) = update.description {
            self.description = description.trim().to_string();
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.quantity)),
            ProductAction::ReserveStock(0) | ProductAction::Restock(0) => {
                Err(ProductError::InvalidQuantity(0))
            }
            ProductAction::ReserveStock(requested) => {
                if requested > self.quantity {
                    return Err(ProductError::InsufficientStock {
                        requested,
                        available: self.quantity,
                    });
                }
                self.quantity -= requested;
                Ok(ProductActionResult::ReserveStock {
                    remaining: self.quantity,
                })
            }
            ProductAction::Restock(amount) => {
                self.quantity = self.quantity.saturating_add(amount);
                Ok(ProductActionResult::Restock {
                    available: self.quantity,
                })
            }
        }
    }
}
