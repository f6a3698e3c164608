pub mod actor_store;
pub mod content_client;
pub mod event_client;
pub mod order_client;
pub mod package_client;
pub mod product_client;
pub mod supply_chain_client;
pub mod user_client;

pub use actor_store::ActorStore;
pub use content_client::ContentClient;
pub use event_client::EventClient;
pub use order_client::OrderClient;
pub use package_client::PackageClient;
pub use product_client::ProductClient;
pub use supply_chain_client::SupplyChainClient;
pub use user_client::UserClient;
