//! Supply chains: the products moving through a territory and the geographic points
//! (farms, mills, warehouses) they pass through.

use crate::model::{ProductId, SupplyChainId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("coordinate out of range: ({latitude};{longitude})")]
pub struct CoordinateError {
    pub latitude: f64,
    pub longitude: f64,
}

/// A WGS84 coordinate with latitude in [-90, 90] and longitude in [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupplyChainPoint {
    latitude: f64,
    longitude: f64,
}

impl SupplyChainPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(CoordinateError {
                latitude,
                longitude,
            })
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for SupplyChainPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({};{})", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyChain {
    pub id: SupplyChainId,
    pub name: String,
    pub description: String,
    pub territorial_area: String,
    pub products: Vec<ProductId>,
    /// Stored as a single `(lat;lng),(lat;lng)` column.
    #[serde(with = "crate::codec::point_column")]
    pub points: Vec<SupplyChainPoint>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SupplyChainCreate {
    pub name: String,
    pub description: String,
    pub territorial_area: String,
    pub points: Vec<SupplyChainPoint>,
}
