//! The real Order actor against mocked actor-store and product clients.

use actor_framework::mock::MockClient;
use actor_framework::{ActorClient, FrameworkError};
use filiera::clients::{ActorStore, OrderClient, ProductClient};
use filiera::model::{
    Actor, ActorId, ActorKind, ActorType, OrderCreate, OrderId, OrderItem, OrderStatus, Product,
    ProductId,
};
use filiera::order_actor::{OrderContext, OrderError};
use filiera::product_actor::{ProductActionResult, ProductError};

fn actor(id: &str, actor_type: ActorType) -> Actor {
    Actor::new(id, &format!("{id}@example.it"), ActorKind::from(actor_type))
        .unwrap()
        .with_id(ActorId::new(id).unwrap())
}

fn item(product: u32, quantity: u32) -> OrderItem {
    OrderItem {
        product_id: ProductId(product),
        product_name: format!("product {product}"),
        quantity,
        unit_price: 2.5,
    }
}

fn order(items: Vec<OrderItem>) -> OrderCreate {
    OrderCreate {
        buyer_id: ActorId::new("buyer").unwrap(),
        seller_id: ActorId::new("seller").unwrap(),
        items,
        delivery_address: Some("Via Roma 1, Alba".into()),
    }
}

fn spawn_orders(
    actors: &MockClient<Actor>,
    products: &MockClient<Product>,
) -> (OrderClient, tokio::task::JoinHandle<()>) {
    spawn_orders_with_lead(actors, products, 4)
}

fn spawn_orders_with_lead(
    actors: &MockClient<Actor>,
    products: &MockClient<Product>,
    delivery_days: u32,
) -> (OrderClient, tokio::task::JoinHandle<()>) {
    let context = OrderContext::new(
        ActorStore::new(actors.client()),
        ProductClient::new(products.client()),
        delivery_days,
    );
    let (actor, client) = filiera::order_actor::new(16);
    let handle = tokio::spawn(actor.run(context));
    (OrderClient::new(client), handle)
}

fn expect_parties(actors: &mut MockClient<Actor>, buyer: ActorType) {
    actors
        .expect_get(ActorId::new("buyer").unwrap())
        .return_ok(Some(actor("buyer", buyer)));
    actors
        .expect_get(ActorId::new("seller").unwrap())
        .return_ok(Some(actor("seller", ActorType::Producer)));
}

#[tokio::test]
async fn test_order_reserves_every_item() {
    let mut actors = MockClient::<Actor>::new();
    let mut products = MockClient::<Product>::new();
    expect_parties(&mut actors, ActorType::Buyer);
    products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::ReserveStock { remaining: 8 });
    products
        .expect_action(ProductId(2))
        .return_ok(ProductActionResult::ReserveStock { remaining: 0 });

    let (orders, handle) = spawn_orders(&actors, &products);
    let id = orders
        .create_order(order(vec![item(1, 2), item(2, 3)]))
        .await
        .unwrap();
    assert_eq!(id, OrderId(1));

    let placed = orders.fetch(id).await.unwrap();
    assert_eq!(placed.status, OrderStatus::Pending);
    assert_eq!(placed.total_amount, 12.5);
    assert_eq!(
        placed.expected_delivery - placed.ordered_at,
        chrono::Duration::days(4)
    );

    actors.verify();
    products.verify();
    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_failed_reservation_releases_earlier_items() {
    let mut actors = MockClient::<Actor>::new();
    let mut products = MockClient::<Product>::new();
    expect_parties(&mut actors, ActorType::Distributor);
    products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::ReserveStock { remaining: 3 });
    products
        .expect_action(ProductId(2))
        .return_err(FrameworkError::EntityError(Box::new(
            ProductError::InsufficientStock {
                requested: 5,
                available: 1,
            },
        )));
    products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::Restock { available: 5 });

    let (orders, handle) = spawn_orders(&actors, &products);
    let err = orders
        .create_order(order(vec![item(1, 2), item(2, 5)]))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::Stock(ProductError::InsufficientStock {
            requested: 5,
            available: 1
        })
    );
    assert!(orders.list_all().await.unwrap().is_empty());

    actors.verify();
    products.verify();
    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_producer_cannot_place_orders() {
    let mut actors = MockClient::<Actor>::new();
    let products = MockClient::<Product>::new();
    actors
        .expect_get(ActorId::new("buyer").unwrap())
        .return_ok(Some(actor("buyer", ActorType::Producer)));

    let (orders, handle) = spawn_orders(&actors, &products);
    let err = orders.create_order(order(vec![item(1, 1)])).await.unwrap_err();
    assert!(matches!(err, OrderError::InvalidParty(_)));

    actors.verify();
    products.verify();
    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_unknown_seller_is_an_invalid_party() {
    let mut actors = MockClient::<Actor>::new();
    let products = MockClient::<Product>::new();
    actors
        .expect_get(ActorId::new("buyer").unwrap())
        .return_ok(Some(actor("buyer", ActorType::Buyer)));
    actors
        .expect_get(ActorId::new("seller").unwrap())
        .return_ok(None);

    let (orders, handle) = spawn_orders(&actors, &products);
    let err = orders.create_order(order(vec![item(1, 1)])).await.unwrap_err();
    assert!(matches!(err, OrderError::InvalidParty(_)));

    actors.verify();
    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_cancel_releases_stock_once() {
    let mut actors = MockClient::<Actor>::new();
    let mut products = MockClient::<Product>::new();
    expect_parties(&mut actors, ActorType::Buyer);
    products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::ReserveStock { remaining: 6 });
    products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::Restock { available: 10 });

    let (orders, handle) = spawn_orders(&actors, &products);
    let id = orders.create_order(order(vec![item(1, 4)])).await.unwrap();
    orders.confirm(id).await.unwrap();

    assert!(orders.cancel(id).await.unwrap());
    assert!(!orders.cancel(id).await.unwrap());
    assert_eq!(orders.fetch(id).await.unwrap().status, OrderStatus::Cancelled);

    products.verify();
    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_unreachable_delivery_date_is_rejected_before_reserving() {
    let mut actors = MockClient::<Actor>::new();
    let products = MockClient::<Product>::new();
    expect_parties(&mut actors, ActorType::Buyer);

    let (orders, handle) = spawn_orders_with_lead(&actors, &products, u32::MAX);
    let err = orders.create_order(order(vec![item(1, 1)])).await.unwrap_err();
    assert!(matches!(err, OrderError::ValidationError(ref msg) if msg.contains("out of range")));

    // The actor survives the failed create.
    assert!(orders.list_all().await.unwrap().is_empty());
    actors.verify();
    products.verify();
    drop(orders);
    handle.await.unwrap();
}
