use crate::model::ProductId;

/// Changes to a package's product set. Each returns whether the set changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageAction {
    AddProduct(ProductId),
    RemoveProduct(ProductId),
}
