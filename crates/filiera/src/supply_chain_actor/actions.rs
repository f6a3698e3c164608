use crate::model::{ProductId, SupplyChainPoint};

/// Each returns whether the chain changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SupplyChainAction {
    AddProduct(ProductId),
    RemoveProduct(ProductId),
    /// Appends a point unless the same coordinate is already on the chain.
    AddPoint(SupplyChainPoint),
}
