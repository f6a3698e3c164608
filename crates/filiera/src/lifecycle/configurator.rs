//! Default prototypes, the command table and demo data.

use super::config::Config;
use super::system::MarketplaceSystem;
use crate::dispatch::handlers::{
    AnonymousLogin, ApproveRegistration, Authenticate, CreateCertificate, CreateEvent,
    CreatePackage, CreateProduct, Login, Moderate, RegisterEvent, RegisterUser, SubmitContent,
    WhoAmI,
};
use crate::dispatch::{ActionDispatcher, AuthorizationGate, CommandError, Handler};
use crate::model::{
    Actor, ActorId, ActorKind, ActorType, PermissionSet, ProductCreate, ProductId, User, UserId,
};
use crate::registry::{PrototypeRegistry, RegistryError};
use chrono::Utc;
use tracing::info;

/// Prototype name and the permissions its accounts start with.
pub const DEFAULT_PROTOTYPES: &[(&str, &[&str])] = &[
    ("Producer", &["certifications", "products_manage"]),
    ("Transformer", &["certifications", "products_manage"]),
    ("Distributor", &["distributor_rights"]),
    ("Curator", &["content_curate"]),
    ("Animator", &["events_manage"]),
    ("Buyer", &["events_participate"]),
    (
        "PlatformManager",
        &["admin_manage_registrations", "content_curate"],
    ),
    ("Approver", &["approve_rights"]),
];

pub fn default_prototypes() -> Result<PrototypeRegistry<User>, RegistryError> {
    let mut registry = PrototypeRegistry::new();
    for (name, permissions) in DEFAULT_PROTOTYPES {
        registry.register(name, User::template(PermissionSet::of(permissions.iter().copied())))?;
    }
    Ok(registry)
}

fn gated<H: Handler>(handler: H, required: &[&str], config: &Config) -> AuthorizationGate<H> {
    AuthorizationGate::new(handler, PermissionSet::of(required.iter().copied()))
        .with_free_access(config.free_access)
}

/// Installs every marketplace command, gated where it needs permissions.
pub fn configure_dispatcher(system: &MarketplaceSystem, config: &Config) -> ActionDispatcher {
    let mut dispatcher = ActionDispatcher::new();
    let users = &system.users;
    let content = &system.content;

    dispatcher.register("login", Login);
    dispatcher.register("anonymousLogin", AnonymousLogin);
    dispatcher.register("whoami", WhoAmI);
    dispatcher.register(
        "authenticate",
        Authenticate {
            users: users.clone(),
        },
    );
    dispatcher.register(
        "register_user",
        RegisterUser {
            users: users.clone(),
        },
    );
    dispatcher.register(
        "admin_approve_registration",
        gated(
            ApproveRegistration {
                users: users.clone(),
            },
            &["admin_manage_registrations"],
            config,
        ),
    );
    dispatcher.register(
        "submit_content",
        SubmitContent {
            content: content.clone(),
        },
    );
    dispatcher.register(
        "create_certificate",
        gated(
            CreateCertificate {
                content: content.clone(),
            },
            &["certifications"],
            config,
        ),
    );
    dispatcher.register(
        "approve_content",
        gated(Moderate::approve(content.clone()), &["content_curate"], config),
    );
    dispatcher.register(
        "reject_content",
        gated(Moderate::reject(content.clone()), &["content_curate"], config),
    );
    dispatcher.register(
        "create_product",
        gated(
            CreateProduct {
                products: system.products.clone(),
            },
            &["products_manage"],
            config,
        ),
    );
    dispatcher.register(
        "create_event",
        gated(
            CreateEvent {
                events: system.events.clone(),
            },
            &["events_manage"],
            config,
        ),
    );
    dispatcher.register(
        "register_event",
        gated(
            RegisterEvent {
                events: system.events.clone(),
            },
            &["events_participate"],
            config,
        ),
    );
    dispatcher.register(
        "distributor_create_package",
        gated(
            CreatePackage {
                packages: system.packages.clone(),
            },
            &["distributor_rights"],
            config,
        ),
    );

    info!(
        commands = dispatcher.commands().len(),
        free_access = config.free_access,
        "Dispatcher configured"
    );
    dispatcher
}

/// Ids of the records created by [`seed_demo`].
#[derive(Debug, Clone)]
pub struct DemoData {
    pub producer: ActorId,
    pub distributor: ActorId,
    pub animator: ActorId,
    pub buyer: ActorId,
    pub product: ProductId,
    /// An approved platform manager account, `admin@filiera.local` / `admin`.
    pub admin: UserId,
}

/// Registers one actor of each trading role, a product and an approved admin account.
pub async fn seed_demo(system: &MarketplaceSystem) -> Result<DemoData, CommandError> {
    let actor = |id: &str, name: &str, actor_type: ActorType| -> Result<Actor, CommandError> {
        let email = format!("{id}@filiera.local");
        Ok(Actor::new(name, &email, ActorKind::from(actor_type))?.with_id(ActorId::new(id)?))
    };

    let producer = system
        .actors
        .register(actor("producer-1", "Cascina Rossi", ActorType::Producer)?)
        .await?;
    let distributor = system
        .actors
        .register(actor("distributor-1", "Trasporti Verdi", ActorType::Distributor)?)
        .await?;
    let animator = system
        .actors
        .register(actor("animator-1", "Pro Loco Alba", ActorType::Animator)?)
        .await?;
    let buyer = system
        .actors
        .register(actor("buyer-1", "Gruppo d'acquisto Bra", ActorType::Buyer)?)
        .await?;

    let product = system
        .products
        .create_product(ProductCreate {
            name: "Nocciole Piemonte IGP".into(),
            category: "Nuts".into(),
            description: "Tonda gentile, shelled".into(),
            cultivation_method: Some("integrated".into()),
            certifications: vec!["IGP".into()],
            production_date: Utc::now().date_naive(),
            producer_id: producer.clone(),
            price: 14.0,
            quantity: 50,
        })
        .await?;

    let admin = system
        .users
        .create_user("PlatformManager", "admin", "admin", "admin@filiera.local")
        .await?;
    system.users.approve_registration(admin).await?;

    info!(%producer, %distributor, %animator, %buyer, %product, %admin, "Demo data seeded");
    Ok(DemoData {
        producer,
        distributor,
        animator,
        buyer,
        product,
        admin,
    })
}
