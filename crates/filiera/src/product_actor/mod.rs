//! # Product Actor
//!
//! The product catalog and its stock counters. Products are indexed by lower-cased
//! category; orders reserve and return stock through [`ProductAction`].
//!
//! ```rust,ignore
//! let level = products.check_stock(id).await?;
//! products.reserve_stock(id, 5).await?; // InsufficientStock if fewer than 5 remain
//! products.restock(id, 5).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}
