use super::config::Config;
use crate::clients::{
    ActorStore, ContentClient, EventClient, OrderClient, PackageClient, ProductClient,
    SupplyChainClient, UserClient,
};
use crate::model::User;
use crate::order_actor::OrderContext;
use crate::package_actor::PackageContext;
use crate::registry::PrototypeRegistry;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

#[derive(Debug, Error)]
#[error("{resource} actor task failed: {source}")]
pub struct ShutdownError {
    pub resource: &'static str,
    #[source]
    pub source: JoinError,
}

/// Every resource actor of the marketplace, running.
///
/// Actors are created first and started with their dependencies afterwards, so the
/// order actor can hold clones of the actor-store and product clients:
///
/// | actor | context |
/// |-------|---------|
/// | actors, users, content, products | `()` |
/// | orders | [`OrderContext`] (actors, products, delivery lead) |
/// | events | [`ActorStore`] |
/// | packages | [`PackageContext`] (actors, products) |
/// | supply chains | [`ProductClient`] |
///
/// ```ignore
/// let system = MarketplaceSystem::new(&Config::default(), default_prototypes()?);
/// let id = system.content.submit(submission).await?;
/// system.shutdown().await?;
/// ```
pub struct MarketplaceSystem {
    pub actors: ActorStore,
    pub users: UserClient,
    pub content: ContentClient,
    pub products: ProductClient,
    pub orders: OrderClient,
    pub events: EventClient,
    pub packages: PackageClient,
    pub supply_chains: SupplyChainClient,

    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl MarketplaceSystem {
    /// Spawns every actor. Must be called inside a tokio runtime.
    pub fn new(config: &Config, prototypes: PrototypeRegistry<User>) -> Self {
        let capacity = config.mailbox_capacity;

        // 1. Create actors (no dependencies)
        let (actor_store, actors) = crate::actor_store::new(capacity);
        let (user_actor, users) = crate::user_actor::new(capacity);
        let (content_actor, content) = crate::content_actor::new(capacity);
        let (product_actor, products) = crate::product_actor::new(capacity);
        let (order_actor, orders) = crate::order_actor::new(capacity);
        let (event_actor, events) = crate::event_actor::new(capacity);
        let (package_actor, packages) = crate::package_actor::new(capacity);
        let (supply_chain_actor, supply_chains) = crate::supply_chain_actor::new(capacity);

        let actors = ActorStore::new(actors);
        let products = ProductClient::new(products);

        // 2. Start actors with injected context
        let handles = vec![
            ("actors", tokio::spawn(actor_store.run(()))),
            ("users", tokio::spawn(user_actor.run(()))),
            ("content", tokio::spawn(content_actor.run(()))),
            ("products", tokio::spawn(product_actor.run(()))),
            (
                "orders",
                tokio::spawn(order_actor.run(OrderContext::new(
                    actors.clone(),
                    products.clone(),
                    config.delivery_days,
                ))),
            ),
            ("events", tokio::spawn(event_actor.run(actors.clone()))),
            (
                "packages",
                tokio::spawn(package_actor.run(PackageContext {
                    actors: actors.clone(),
                    products: products.clone(),
                })),
            ),
            (
                "supply_chains",
                tokio::spawn(supply_chain_actor.run(products.clone())),
            ),
        ];
        info!(actors = handles.len(), prototypes = prototypes.len(), "Marketplace started");

        Self {
            actors,
            users: UserClient::new(users, Arc::new(prototypes)),
            content: ContentClient::new(content),
            products,
            orders: OrderClient::new(orders),
            events: EventClient::new(events),
            packages: PackageClient::new(packages),
            supply_chains: SupplyChainClient::new(supply_chains),
            handles,
        }
    }

    /// Drops every client and waits for the actors to drain their mailboxes.
    ///
    /// Clones held elsewhere (a dispatcher's handlers) keep their actors alive, so drop
    /// those first. Dependents are awaited before the actors they hold clients of.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down marketplace...");
        let Self {
            actors,
            users,
            content,
            products,
            orders,
            events,
            packages,
            supply_chains,
            handles,
        } = self;
        drop((orders, events, packages, supply_chains));
        drop((users, content, products, actors));

        // Dependents were spawned after their dependencies.
        for (resource, handle) in handles.into_iter().rev() {
            if let Err(source) = handle.await {
                error!(resource, error = %source, "Actor task failed");
                return Err(ShutdownError { resource, source });
            }
        }
        info!("Marketplace shutdown complete.");
        Ok(())
    }
}
