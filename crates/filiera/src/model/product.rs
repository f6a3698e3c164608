//! Represents a product offered by a producer.
//!
//! # Actor Framework
//! Managed by the [`product_actor`](crate::product_actor), which indexes products by
//! lower-cased category and owns the stock counter that orders reserve against.

use crate::model::{ActorId, ProductId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub cultivation_method: Option<String>,
    pub certifications: Vec<String>,
    pub production_date: NaiveDate,
    pub producer_id: ActorId,
    pub price: f64,
    pub quantity: u32,
}

/// DTO for Product creation.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub category: String,
    pub description: String,
    pub cultivation_method: Option<String>,
    pub certifications: Vec<String>,
    pub production_date: NaiveDate,
    pub producer_id: ActorId,
    pub price: f64,
    pub quantity: u32,
}

/// DTO for Product updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub price: Option<f64>,
    pub quantity: Option<u32>,
    pub description: Option<String>,
}
