use actor_framework::{ActorClient, ActorEntity, FrameworkError, ResourceActor, ResourceClient};
use async_trait::async_trait;
use std::collections::HashSet;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Barrel {
    id: u32,
    cellar: String,
    litres: u32,
}

#[derive(Debug)]
struct BarrelCreate {
    cellar: String,
    litres: u32,
}

#[derive(Debug)]
struct MoveTo(String);

#[derive(Debug)]
enum BarrelAction {
    Draw(u32),
}

#[derive(Debug, thiserror::Error)]
enum BarrelError {
    #[error("only {available} litres left")]
    Empty { available: u32 },
    #[error(transparent)]
    Framework(#[from] FrameworkError),
    #[error("{0}")]
    Other(String),
}

impl From<String> for BarrelError {
    fn from(msg: String) -> Self {
        BarrelError::Other(msg)
    }
}

#[async_trait]
impl ActorEntity for Barrel {
    type Id = u32;
    type Partition = String;
    type Create = BarrelCreate;
    type Update = MoveTo;
    type Action = BarrelAction;
    type ActionResult = u32;
    type Context = ();
    type Error = BarrelError;

    fn assign_id(sequence: u32) -> u32 {
        sequence
    }

    fn id(&self) -> &u32 {
        &self.id
    }

    fn partition(&self) -> String {
        self.cellar.clone()
    }

    fn from_create_params(id: u32, params: BarrelCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            cellar: params.cellar,
            litres: params.litres,
        })
    }

    async fn on_update(&mut self, update: MoveTo, _ctx: &()) -> Result<(), Self::Error> {
        self.cellar = update.0;
        Ok(())
    }

    async fn handle_action(&mut self, action: BarrelAction, _ctx: &()) -> Result<u32, Self::Error> {
        match action {
            BarrelAction::Draw(amount) if amount > self.litres => Err(BarrelError::Empty {
                available: self.litres,
            }),
            BarrelAction::Draw(amount) => {
                self.litres -= amount;
                Ok(self.litres)
            }
        }
    }
}

struct BarrelClient {
    inner: ResourceClient<Barrel>,
}

impl ActorClient<Barrel> for BarrelClient {
    type Error = BarrelError;

    fn inner(&self) -> &ResourceClient<Barrel> {
        &self.inner
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Barrel>::new(10);
    let handle = tokio::spawn(actor.run(()));

    let id = client
        .create(BarrelCreate {
            cellar: "north".into(),
            litres: 200,
        })
        .await
        .unwrap();
    assert_eq!(id, 1);

    assert_eq!(client.perform_action(id, BarrelAction::Draw(50)).await.unwrap(), 150);

    let err = client
        .perform_action(id, BarrelAction::Draw(500))
        .await
        .unwrap_err();
    let typed = err.into_entity_error::<BarrelError>().unwrap();
    assert!(matches!(typed, BarrelError::Empty { available: 150 }));

    let moved = client.update(id, MoveTo("south".into())).await.unwrap();
    assert_eq!(moved.cellar, "south");
    assert_eq!(moved.litres, 150);
    assert!(client.list_partition("north".into()).await.unwrap().is_empty());
    assert_eq!(client.list_partition("south".into()).await.unwrap(), vec![moved]);

    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let (actor, client) = ResourceActor::<Barrel>::new(4);
    tokio::spawn(actor.run(()));

    let tasks: Vec<_> = (0..50)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .create(BarrelCreate {
                        cellar: format!("cellar-{}", i % 3),
                        litres: i,
                    })
                    .await
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for task in tasks {
        ids.insert(task.await.unwrap().unwrap());
    }
    assert_eq!(ids.len(), 50);

    let census = client.census().await.unwrap();
    assert_eq!(census.values().sum::<usize>(), 50);
    assert_eq!(census.len(), 3);
}

#[tokio::test]
async fn test_actor_client_fetch_maps_missing_to_error() {
    let (actor, inner) = ResourceActor::<Barrel>::new(4);
    tokio::spawn(actor.run(()));
    let client = BarrelClient { inner };

    assert!(client.get(42).await.unwrap().is_none());
    let err = client.fetch(42).await.unwrap_err();
    assert!(matches!(err, BarrelError::Framework(FrameworkError::NotFound(id)) if id == "42"));
}

#[tokio::test]
async fn test_closed_actor_reports_actor_closed() {
    let (actor, client) = ResourceActor::<Barrel>::new(4);
    drop(actor);

    let err = client.get(1).await.unwrap_err();
    assert!(matches!(err, FrameworkError::ActorClosed));
}
