use crate::model::{ActorId, PackageId, ProductId};
use serde::{Deserialize, Serialize};

/// A bundle of products assembled by a distributor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPackage {
    pub id: PackageId,
    pub name: String,
    pub distributor_id: ActorId,
    pub products: Vec<ProductId>,
}

#[derive(Debug, Clone)]
pub struct PackageCreate {
    pub name: String,
    pub distributor_id: ActorId,
    pub products: Vec<ProductId>,
}
