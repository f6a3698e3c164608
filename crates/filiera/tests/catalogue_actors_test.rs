//! Package, Event and Supply Chain actors against mocked actor-store and product clients.

use actor_framework::mock::MockClient;
use actor_framework::{ActorClient, ActorEntity};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use filiera::clients::{ActorStore, EventClient, PackageClient, ProductClient, SupplyChainClient};
use filiera::event_actor::EventError;
use filiera::model::{
    Actor, ActorId, ActorKind, ActorType, EventCreate, PackageCreate, PackageId,
    ParticipationId, ParticipationRole, Product, ProductCreate, ProductId, SupplyChainCreate,
    SupplyChainId,
};
use filiera::package_actor::{PackageContext, PackageError};
use filiera::supply_chain_actor::SupplyChainError;

fn actor(id: &str, actor_type: ActorType) -> Actor {
    Actor::new(id, &format!("{id}@example.it"), ActorKind::from(actor_type))
        .unwrap()
        .with_id(ActorId::new(id).unwrap())
}

fn product(id: u32) -> Product {
    Product::from_create_params(
        ProductId(id),
        ProductCreate {
            name: format!("product {id}"),
            category: "Honey".into(),
            description: String::new(),
            cultivation_method: None,
            certifications: vec![],
            production_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            producer_id: ActorId::new("producer").unwrap(),
            price: 8.5,
            quantity: 20,
        },
    )
    .unwrap()
}

fn spawn_packages(
    actors: &MockClient<Actor>,
    products: &MockClient<Product>,
) -> (PackageClient, tokio::task::JoinHandle<()>) {
    let context = PackageContext {
        actors: ActorStore::new(actors.client()),
        products: ProductClient::new(products.client()),
    };
    let (actor, client) = filiera::package_actor::new(16);
    let handle = tokio::spawn(actor.run(context));
    (PackageClient::new(client), handle)
}

fn paniere(products: &[u32]) -> PackageCreate {
    PackageCreate {
        name: "Paniere".into(),
        distributor_id: ActorId::new("distributor").unwrap(),
        products: products.iter().copied().map(ProductId).collect(),
    }
}

#[tokio::test]
async fn test_package_keeps_at_least_one_product() {
    let mut actors = MockClient::<Actor>::new();
    let mut products = MockClient::<Product>::new();
    actors
        .expect_get(ActorId::new("distributor").unwrap())
        .return_ok(Some(actor("distributor", ActorType::Distributor)));
    products
        .expect_get(ProductId(1))
        .return_ok(Some(product(1)));

    let (packages, handle) = spawn_packages(&actors, &products);
    let id = packages.create_package(paniere(&[1])).await.unwrap();
    assert_eq!(id, PackageId(1));

    // Already in the package: no lookup, no change.
    assert!(!packages.add_product(id, ProductId(1)).await.unwrap());
    assert!(!packages.remove_product(id, ProductId(9)).await.unwrap());
    assert!(matches!(
        packages.remove_product(id, ProductId(1)).await,
        Err(PackageError::ValidationError(_))
    ));
    assert_eq!(packages.fetch(id).await.unwrap().products, vec![ProductId(1)]);

    actors.verify();
    products.verify();
    drop(packages);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_package_rejects_a_buyer_as_distributor() {
    let mut actors = MockClient::<Actor>::new();
    let products = MockClient::<Product>::new();
    actors
        .expect_get(ActorId::new("distributor").unwrap())
        .return_ok(Some(actor("distributor", ActorType::Buyer)));

    let (packages, handle) = spawn_packages(&actors, &products);
    let err = packages.create_package(paniere(&[1])).await.unwrap_err();
    assert!(matches!(err, PackageError::InvalidDistributor(ref msg) if msg.contains("Buyer")));
    assert!(packages.list_all().await.unwrap().is_empty());

    actors.verify();
    products.verify();
    drop(packages);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_package_add_checks_the_product_exists() {
    let mut actors = MockClient::<Actor>::new();
    let mut products = MockClient::<Product>::new();
    actors
        .expect_get(ActorId::new("distributor").unwrap())
        .return_ok(Some(actor("distributor", ActorType::Distributor)));
    products
        .expect_get(ProductId(1))
        .return_ok(Some(product(1)));
    products.expect_get(ProductId(2)).return_ok(None);
    products
        .expect_get(ProductId(3))
        .return_ok(Some(product(3)));

    let (packages, handle) = spawn_packages(&actors, &products);
    let id = packages.create_package(paniere(&[1])).await.unwrap();
    assert_eq!(
        packages.add_product(id, ProductId(2)).await,
        Err(PackageError::UnknownProduct("product_2".into()))
    );
    assert!(packages.add_product(id, ProductId(3)).await.unwrap());
    assert!(packages.remove_product(id, ProductId(1)).await.unwrap());

    let distributor = ActorId::new("distributor").unwrap();
    let listed = packages.list_by_distributor(&distributor).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].products, vec![ProductId(3)]);

    products.verify();
    drop(packages);
    handle.await.unwrap();
}

fn spawn_events(actors: &MockClient<Actor>) -> (EventClient, tokio::task::JoinHandle<()>) {
    let (actor, client) = filiera::event_actor::new(16);
    let handle = tokio::spawn(actor.run(ActorStore::new(actors.client())));
    (EventClient::new(client), handle)
}

fn fair(title: &str, month: u32) -> EventCreate {
    EventCreate {
        title: title.into(),
        description: String::new(),
        starts_at: Utc.with_ymd_and_hms(2027, month, 9, 9, 0, 0).unwrap(),
        location: "Alba".into(),
        organizer_id: ActorId::new("animator").unwrap(),
    }
}

#[tokio::test]
async fn test_upcoming_events_are_sorted_and_unregister_is_idempotent() {
    let mut actors = MockClient::<Actor>::new();
    for _ in 0..3 {
        actors
            .expect_get(ActorId::new("animator").unwrap())
            .return_ok(Some(actor("animator", ActorType::Animator)));
    }
    actors
        .expect_get(ActorId::new("visitor").unwrap())
        .return_ok(Some(actor("visitor", ActorType::Buyer)));

    let (events, handle) = spawn_events(&actors);
    let october = events.create_event(fair("Tartufo", 10)).await.unwrap();
    let march = events.create_event(fair("Vinitaly", 3)).await.unwrap();
    let june = events.create_event(fair("Cheese", 6)).await.unwrap();

    let now = Utc.with_ymd_and_hms(2027, 4, 1, 0, 0, 0).unwrap();
    let upcoming: Vec<_> = events
        .upcoming(now)
        .await
        .unwrap()
        .into_iter()
        .map(|event| event.id)
        .collect();
    assert_eq!(upcoming, vec![june, october]);
    let everything = events.upcoming(now - Duration::days(365)).await.unwrap();
    assert_eq!(everything[0].id, march);

    let visitor = ActorId::new("visitor").unwrap();
    assert_eq!(
        events
            .register_participant(june, visitor.clone(), ParticipationRole::Visitor)
            .await,
        Ok(ParticipationId(1))
    );
    assert!(events
        .unregister_participant(june, visitor.clone())
        .await
        .unwrap());
    assert!(!events.unregister_participant(june, visitor).await.unwrap());
    assert!(events.fetch(june).await.unwrap().participations.is_empty());

    actors.verify();
    drop(events);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_unknown_actor_cannot_register() {
    let mut actors = MockClient::<Actor>::new();
    actors
        .expect_get(ActorId::new("animator").unwrap())
        .return_ok(Some(actor("animator", ActorType::Animator)));
    actors
        .expect_get(ActorId::new("ghost").unwrap())
        .return_ok(None);

    let (events, handle) = spawn_events(&actors);
    let id = events.create_event(fair("Tartufo", 10)).await.unwrap();
    let err = events
        .register_participant(id, ActorId::new("ghost").unwrap(), ParticipationRole::Visitor)
        .await
        .unwrap_err();
    assert_eq!(err, EventError::InvalidParticipant("ghost not found".into()));

    actors.verify();
    drop(events);
    handle.await.unwrap();
}

fn spawn_chains(
    products: &MockClient<Product>,
) -> (SupplyChainClient, tokio::task::JoinHandle<()>) {
    let (actor, client) = filiera::supply_chain_actor::new(16);
    let handle = tokio::spawn(actor.run(ProductClient::new(products.client())));
    (SupplyChainClient::new(client), handle)
}

fn chain(name: &str, area: &str) -> SupplyChainCreate {
    SupplyChainCreate {
        name: name.into(),
        description: String::new(),
        territorial_area: area.into(),
        points: vec![],
    }
}

#[tokio::test]
async fn test_supply_chain_lookups() {
    let mut products = MockClient::<Product>::new();
    products
        .expect_get(ProductId(4))
        .return_ok(Some(product(4)));

    let (chains, handle) = spawn_chains(&products);
    let olio = chains
        .create_supply_chain(chain("Olio del Garda", "Garda"))
        .await
        .unwrap();
    let vino = chains
        .create_supply_chain(chain("Vino delle Langhe", "Langhe"))
        .await
        .unwrap();
    assert_eq!((olio, vino), (SupplyChainId(1), SupplyChainId(2)));

    assert!(chains.add_product(olio, ProductId(4)).await.unwrap());
    assert!(!chains.add_product(olio, ProductId(4)).await.unwrap());

    let found = chains.find_by_name("  GARDA ").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, olio);
    assert_eq!(chains.list_by_area(" garda").await.unwrap().len(), 1);
    assert!(chains.list_by_area("Toscana").await.unwrap().is_empty());

    let containing = chains.containing_product(ProductId(4)).await.unwrap();
    assert_eq!(containing.len(), 1);
    assert_eq!(containing[0].id, olio);

    assert!(chains.remove_product(olio, ProductId(4)).await.unwrap());
    assert!(!chains.remove_product(olio, ProductId(4)).await.unwrap());
    assert!(chains
        .containing_product(ProductId(4))
        .await
        .unwrap()
        .is_empty());

    products.verify();
    drop(chains);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_supply_chain_action_on_missing_chain_is_not_found() {
    let products = MockClient::<Product>::new();
    let (chains, handle) = spawn_chains(&products);

    assert!(matches!(
        chains.remove_product(SupplyChainId(7), ProductId(1)).await,
        Err(SupplyChainError::NotFound(_))
    ));

    products.verify();
    drop(chains);
    handle.await.unwrap();
}
