//! Entity trait implementation for the Order domain type.
//!
//! `on_create` runs before the order is stored. If it fails the order never exists, so
//! every reservation it made is released before returning the error.

use super::actions::OrderAction;
use super::error::OrderError;
use super::OrderContext;
use crate::model::{non_negative, Order, OrderCreate, OrderId, OrderItem, OrderStatus};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

fn validate_item(item: &OrderItem) -> Result<(), OrderError> {
    if item.quantity == 0 {
        return Err(OrderError::ValidationError(format!(
            "quantity for {} must be positive",
            item.product_id
        )));
    }
    if !non_negative(item.unit_price) {
        return Err(OrderError::ValidationError(format!(
            "unit price for {} must be non-negative",
            item.product_id
        )));
    }
    Ok(())
}

impl Order {
    pub(crate) fn recompute_total(&mut self) {
        self.total_amount = self.items.iter().map(OrderItem::subtotal).sum();
    }

    /// Moves along the forward path `Pending -> ... -> Delivered`.
    fn advance(&mut self, from: OrderStatus, to: OrderStatus) -> Result<bool, OrderError> {
        if self.status != from {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        if to == OrderStatus::Delivered {
            self.delivered_at = Some(Utc::now());
        }
        Ok(true)
    }

    async fn validate_parties(&self, ctx: &OrderContext) -> Result<(), OrderError> {
        let lookup = |e: crate::actor_store::ActorError| {
            OrderError::ActorCommunicationError(e.to_string())
        };

        let buyer = ctx
            .actors
            .find_by_id(&self.buyer_id)
            .await
            .map_err(lookup)?
            .ok_or_else(|| OrderError::InvalidParty(format!("buyer {} not found", self.buyer_id)))?;
        if !buyer.is_active() {
            return Err(OrderError::InvalidParty(format!(
                "buyer {} is inactive",
                self.buyer_id
            )));
        }
        if !buyer.can_make_purchases() {
            return Err(OrderError::InvalidParty(format!(
                "{} ({}) cannot make purchases",
                self.buyer_id,
                buyer.actor_type()
            )));
        }

        if ctx
            .actors
            .find_by_id(&self.seller_id)
            .await
            .map_err(lookup)?
            .is_none()
        {
            return Err(OrderError::InvalidParty(format!(
                "seller {} not found",
                self.seller_id
            )));
        }
        Ok(())
    }

    /// Reserves every item in order, releasing the earlier ones if one fails.
    async fn reserve_items(&self, ctx: &OrderContext) -> Result<(), OrderError> {
        for (reserved, item) in self.items.iter().enumerate() {
            if let Err(e) = ctx.products.reserve_stock(item.product_id, item.quantity).await {
                warn!(
                    order = %self.id,
                    product = %item.product_id,
                    error = %e,
                    "Reservation failed, rolling back"
                );
                release(&self.items[..reserved], ctx).await;
                return Err(OrderError::Stock(e));
            }
        }
        Ok(())
    }
}

/// Best effort: a failed restock is logged, not propagated.
async fn release(items: &[OrderItem], ctx: &OrderContext) {
    for item in items {
        if let Err(e) = ctx.products.restock(item.product_id, item.quantity).await {
            warn!(product = %item.product_id, error = %e, "Failed to release stock");
        }
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Partition = OrderStatus;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = bool;
    type Context = OrderContext;
    type Error = OrderError;

    fn assign_id(sequence: u32) -> OrderId {
        OrderId(sequence)
    }

    fn id(&self) -> &OrderId {
        &self.id
    }

    fn partition(&self) -> OrderStatus {
        self.status
    }

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::ValidationError(
                "an order needs at least one item".into(),
            ));
        }
        params.items.iter().try_for_each(validate_item)?;

        let now = Utc::now();
        let mut order = Self {
            id,
            buyer_id: params.buyer_id,
            seller_id: params.seller_id,
            items: params.items,
            total_amount: 0.0,
            status: OrderStatus::Pending,
            ordered_at: now,
            expected_delivery: now,
            delivered_at: None,
            delivery_address: params
                .delivery_address
                .as_deref()
                .and_then(crate::model::non_blank),
        };
        order.recompute_total();
        Ok(order)
    }

    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
        self.validate_parties(ctx).await?;
        self.expected_delivery = self
            .ordered_at
            .checked_add_signed(ctx.delivery_lead)
            .ok_or_else(|| {
                OrderError::ValidationError(format!(
                    "delivery lead of {} days is out of range",
                    ctx.delivery_lead.num_days()
                ))
            })?;
        self.reserve_items(ctx).await?;
        info!(order = %self.id, total = self.total_amount, "Stock reserved");
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &OrderContext) -> Result<(), OrderError> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<bool, OrderError> {
        use OrderStatus::*;
        match action {
            OrderAction::Confirm => self.advance(Pending, Confirmed),
            OrderAction::StartProcessing => self.advance(Confirmed, Processing),
            OrderAction::Ship => self.advance(Processing, Shipped),
            OrderAction::Deliver => self.advance(Shipped, Delivered),
            OrderAction::Cancel => match self.status {
                Cancelled => Ok(false),
                Delivered => Err(OrderError::InvalidTransition {
                    from: Delivered,
                    to: Cancelled,
                }),
                _ => {
                    release(&self.items, ctx).await;
                    self.status = Cancelled;
                    Ok(true)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActorId, ProductId};

    fn params(items: Vec<OrderItem>) -> OrderCreate {
        OrderCreate {
            buyer_id: ActorId::new("buyer").unwrap(),
            seller_id: ActorId::new("seller").unwrap(),
            items,
            delivery_address: Some("  ".into()),
        }
    }

    fn item(product: u32, quantity: u32, unit_price: f64) -> OrderItem {
        OrderItem {
            product_id: ProductId(product),
            product_name: format!("product {product}"),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn test_total_is_recomputed_from_items() {
        let order =
            Order::from_create_params(OrderId(1), params(vec![item(1, 2, 3.5), item(2, 1, 10.0)]))
                .unwrap();
        assert_eq!(order.total_amount, 17.0);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.delivery_address, None);
    }

    #[test]
    fn test_empty_and_zero_quantity_orders_are_rejected() {
        assert!(matches!(
            Order::from_create_params(OrderId(1), params(vec![])),
            Err(OrderError::ValidationError(_))
        ));
        assert!(Order::from_create_params(OrderId(1), params(vec![item(1, 0, 1.0)])).is_err());
        assert!(Order::from_create_params(OrderId(1), params(vec![item(1, 1, -1.0)])).is_err());
    }

    #[test]
    fn test_forward_path_rejects_skipped_steps() {
        let mut order =
            Order::from_create_params(OrderId(1), params(vec![item(1, 1, 1.0)])).unwrap();
        assert_eq!(
            order.advance(OrderStatus::Processing, OrderStatus::Shipped),
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Shipped
            })
        );
        assert_eq!(order.advance(OrderStatus::Pending, OrderStatus::Confirmed), Ok(true));
    }
}
