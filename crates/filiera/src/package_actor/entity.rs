//! Entity trait implementation for the ProductPackage domain type.

use super::actions::PackageAction;
use super::error::PackageError;
use super::PackageContext;
use crate::model::{
    non_blank, ActorId, ActorType, PackageCreate, PackageId, ProductId, ProductPackage,
};
use actor_framework::{ActorClient, ActorEntity};
use async_trait::async_trait;
use std::collections::HashSet;

async fn ensure_product(ctx: &PackageContext, id: ProductId) -> Result<(), PackageError> {
    match ctx.products.get(id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(PackageError::UnknownProduct(id.to_string())),
        Err(e) => Err(PackageError::ActorCommunicationError(e.to_string())),
    }
}

#[async_trait]
impl ActorEntity for ProductPackage {
    type Id = PackageId;
    /// Distributor.
    type Partition = ActorId;
    type Create = PackageCreate;
    type Update = ();
    type Action = PackageAction;
    type ActionResult = bool;
    type Context = PackageContext;
    type Error = PackageError;

    fn assign_id(sequence: u32) -> PackageId {
        PackageId(sequence)
    }

    fn id(&self) -> &PackageId {
        &self.id
    }

    fn partition(&self) -> ActorId {
        self.distributor_id.clone()
    }

    fn from_create_params(id: PackageId, params: PackageCreate) -> Result<Self, PackageError> {
        let name = non_blank(&params.name)
            .ok_or_else(|| PackageError::ValidationError("name cannot be blank".into()))?;
        if params.products.is_empty() {
            return Err(PackageError::ValidationError(
                "a package needs at least one product".into(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = params.products.iter().find(|id| !seen.insert(**id)) {
            return Err(PackageError::ValidationError(format!(
                "{duplicate} is listed twice"
            )));
        }
        Ok(Self {
            id,
            name,
            distributor_id: params.distributor_id,
            products: params.products,
        })
    }

    async fn on_create(&mut self, ctx: &PackageContext) -> Result<(), PackageError> {
        let distributor = ctx
            .actors
            .find_by_id(&self.distributor_id)
            .await
            .map_err(|e| PackageError::ActorCommunicationError(e.to_string()))?
            .ok_or_else(|| {
                PackageError::InvalidDistributor(format!("{} not found", self.distributor_id))
            })?;
        if distributor.actor_type() != ActorType::Distributor {
            return Err(PackageError::InvalidDistributor(format!(
                "{} is a {}",
                self.distributor_id,
                distributor.actor_type()
            )));
        }
        for product in &self.products {
            ensure_product(ctx, *product).await?;
        }
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &PackageContext) -> Result<(), PackageError> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: PackageAction,
        ctx: &PackageContext,
    ) -> Result<bool, PackageError> {
        match action {
            PackageAction::AddProduct(product) => {
                if self.products.contains(&product) {
                    return Ok(false);
                }
                ensure_product(ctx, product).await?;
                self.products.push(product);
                Ok(true)
            }
            PackageAction::RemoveProduct(product) => {
                if !self.products.contains(&product) {
                    return Ok(false);
                }
                if self.products.len() == 1 {
                    return Err(PackageError::ValidationError(format!(
                        "cannot remove {product}, the last product of {}",
                        self.id
                    )));
                }
                self.products.retain(|p| *p != product);
                Ok(true)
            }
        }
    }
}
