//! # Order Client
//!
//! Placing orders, driving their status and reporting on them.
use crate::model::{ActorId, Order, OrderCreate, OrderId, OrderStatus};
use crate::order_actor::{OrderAction, OrderError};
use actor_framework::ActorClient;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, instrument};

resource_client!(
    /// Client for interacting with the Order actor.
    Order, OrderError
);

impl OrderClient {
    /// Validates the parties, reserves stock and stores the order as `Pending`.
    #[instrument(skip(self))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    async fn transition(&self, id: OrderId, action: OrderAction) -> Result<bool, OrderError> {
        debug!(%id, ?action, "Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn confirm(&self, id: OrderId) -> Result<bool, OrderError> {
        self.transition(id, OrderAction::Confirm).await
    }

    #[instrument(skip(self))]
    pub async fn start_processing(&self, id: OrderId) -> Result<bool, OrderError> {
        self.transition(id, OrderAction::StartProcessing).await
    }

    #[instrument(skip(self))]
    pub async fn ship(&self, id: OrderId) -> Result<bool, OrderError> {
        self.transition(id, OrderAction::Ship).await
    }

    #[instrument(skip(self))]
    pub async fn deliver(&self, id: OrderId) -> Result<bool, OrderError> {
        self.transition(id, OrderAction::Deliver).await
    }

    /// Releases the order's stock. `false` if it was already cancelled.
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: OrderId) -> Result<bool, OrderError> {
        self.transition(id, OrderAction::Cancel).await
    }

    pub async fn by_buyer(&self, buyer: &ActorId) -> Result<Vec<Order>, OrderError> {
        let buyer = buyer.clone();
        self.inner
            .query(move |order: &Order| order.buyer_id == buyer)
            .await
            .map_err(Self::map_error)
    }

    pub async fn by_seller(&self, seller: &ActorId) -> Result<Vec<Order>, OrderError> {
        let seller = seller.clone();
        self.inner
            .query(move |order: &Order| order.seller_id == seller)
            .await
            .map_err(Self::map_error)
    }

    pub async fn by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        self.inner
            .list_partition(status)
            .await
            .map_err(Self::map_error)
    }

    /// Orders placed within `[start, end]`.
    #[instrument(skip(self))]
    pub async fn by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Order>, OrderError> {
        if start > end {
            return Err(OrderError::ValidationError(format!(
                "range start {start} is after end {end}"
            )));
        }
        self.inner
            .query(move |order: &Order| order.ordered_at >= start && order.ordered_at <= end)
            .await
            .map_err(Self::map_error)
    }

    /// Orders whose total lies within `[min, max]`.
    #[instrument(skip(self))]
    pub async fn by_amount_range(&self, min: f64, max: f64) -> Result<Vec<Order>, OrderError> {
        if !crate::model::non_negative(min) || max < min {
            return Err(OrderError::ValidationError(format!(
                "invalid amount range [{min}, {max}]"
            )));
        }
        self.inner
            .query(move |order: &Order| order.total_amount >= min && order.total_amount <= max)
            .await
            .map_err(Self::map_error)
    }

    /// Not yet delivered or cancelled and past the expected delivery.
    pub async fn overdue(&self, now: DateTime<Utc>) -> Result<Vec<Order>, OrderError> {
        self.inner
            .query(move |order: &Order| order.is_overdue(now))
            .await
            .map_err(Self::map_error)
    }

    pub async fn count_by_status(&self) -> Result<HashMap<OrderStatus, usize>, OrderError> {
        self.census().await
    }

    /// Sum over delivered orders.
    pub async fn total_revenue(&self) -> Result<f64, OrderError> {
        let delivered = self.by_status(OrderStatus::Delivered).await?;
        Ok(delivered.iter().map(|order| order.total_amount).sum())
    }

    /// Sum over the seller's delivered orders.
    pub async fn revenue_for_seller(&self, seller: &ActorId) -> Result<f64, OrderError> {
        let delivered = self.by_status(OrderStatus::Delivered).await?;
        Ok(delivered
            .iter()
            .filter(|order| &order.seller_id == seller)
            .map(|order| order.total_amount)
            .sum())
    }

    /// Mean total over all orders, `0.0` when there are none.
    pub async fn average_order_value(&self) -> Result<f64, OrderError> {
        let orders = self.list_all().await?;
        if orders.is_empty() {
            return Ok(0.0);
        }
        let total: f64 = orders.iter().map(|order| order.total_amount).sum();
        Ok(total / orders.len() as f64)
    }
}
