//! Represents a purchase from a seller by a buyer.
//!
//! # Actor Framework
//! Managed by the [`order_actor`](crate::order_actor). Creating an order validates both
//! parties and reserves stock through the injected clients; the status then moves along
//! `Pending -> Confirmed -> Processing -> Shipped -> Delivered`, with `Cancelled`
//! reachable from anything but `Delivered`.

use crate::model::{ActorId, OrderId, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl OrderItem {
    pub fn subtotal(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub buyer_id: ActorId,
    pub seller_id: ActorId,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub ordered_at: DateTime<Utc>,
    pub expected_delivery: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub delivery_address: Option<String>,
}

impl Order {
    pub fn is_delivered(&self) -> bool {
        self.status == OrderStatus::Delivered
    }

    /// Not yet delivered or cancelled, and past the expected delivery time.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !matches!(self.status, OrderStatus::Delivered | OrderStatus::Cancelled)
            && now > self.expected_delivery
    }
}

/// Payload for placing an order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub buyer_id: ActorId,
    pub seller_id: ActorId,
    pub items: Vec<OrderItem>,
    pub delivery_address: Option<String>,
}
