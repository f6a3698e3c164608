//! # Mock Framework & Testing Guide
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are answered
//! from a queue of expectations instead of a running actor. Use it to test an actor whose
//! hooks call other actors (pattern 2) or client wrappers in isolation (pattern 0).
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **State** | No real state (expectations) | Real state management |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! Expectations are consumed in order. A request that does not match the next expectation
//! (wrong kind or wrong id, or no expectation left) is dropped unanswered, which the caller
//! observes as [`FrameworkError::ActorDropped`], and recorded: [`MockClient::verify`]
//! panics on it.
//!
//! ```rust,ignore
//! let mut products = MockClient::<Product>::new();
//! products
//!     .expect_action(ProductId(1))
//!     .return_ok(ProductActionResult::Reserved { remaining: 7 });
//!
//! let (order_actor, orders) = ResourceActor::<Order>::new(8);
//! tokio::spawn(order_actor.run(OrderContext::new(actors, ProductClient::new(products.client()))));
//! // ... exercise the order actor ...
//! products.verify();
//! ```
//!
//! ## Legacy helpers
//!
//! [`create_mock_client`] returns a client plus the raw receiver so a test can inspect the
//! exact request and answer it by hand ([`expect_create`], [`expect_get`],
//! [`expect_action`], [`expect_query`]).

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response to return for it.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Insert {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Query {
        response: Result<Vec<T>, FrameworkError>,
    },
    Partition {
        key: T::Partition,
        response: Result<Vec<T>, FrameworkError>,
    },
}

impl<T: ActorEntity> Expectation<T> {
    fn name(&self) -> &'static str {
        match self {
            Self::Get { .. } => "Get",
            Self::Create { .. } => "Create",
            Self::Insert { .. } => "Insert",
            Self::Update { .. } => "Update",
            Self::Delete { .. } => "Delete",
            Self::Action { .. } => "Action",
            Self::Query { .. } => "Query",
            Self::Partition { .. } => "Partition",
        }
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;
type Log = Arc<Mutex<Vec<String>>>;

fn answer<R>(respond_to: Response<R>, response: Result<R, FrameworkError>) {
    let _ = respond_to.send(response);
}

fn record(log: &Log, failure: String) {
    tracing::error!(%failure, "Mock received an unexpected request");
    log.lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(failure);
}

/// Answers only if the request targets the expected id. A mismatch is recorded before
/// `respond_to` is dropped.
fn answer_for<I, R>(
    log: &Log,
    kind: &str,
    expected: &I,
    actual: &I,
    respond_to: Response<R>,
    response: Result<R, FrameworkError>,
) where
    I: PartialEq + std::fmt::Debug,
{
    if expected == actual {
        answer(respond_to, response);
    } else {
        let failure = format!("{kind} expected for {expected:?} but received {actual:?}");
        record(log, failure);
    }
}

/// Answers `request` from `expectation`.
///
/// On a mismatch the failure is recorded for `verify` and the request is then dropped
/// unanswered, so the caller sees [`FrameworkError::ActorDropped`].
fn serve<T: ActorEntity>(
    request: ResourceRequest<T>,
    expectation: Option<Expectation<T>>,
    log: &Log,
) {
    match (request, expectation) {
        (
            ResourceRequest::Get { id, respond_to },
            Some(Expectation::Get {
                id: expected,
                response,
            }),
        ) => answer_for(log, "Get", &expected, &id, respond_to, response),
        (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            answer(respond_to, response)
        }
        (ResourceRequest::Insert { respond_to, .. }, Some(Expectation::Insert { response })) => {
            answer(respond_to, response)
        }
        (
            ResourceRequest::Update { id, respond_to, .. },
            Some(Expectation::Update {
                id: expected,
                response,
            }),
        ) => answer_for(log, "Update", &expected, &id, respond_to, response),
        (
            ResourceRequest::Delete { id, respond_to },
            Some(Expectation::Delete {
                id: expected,
                response,
            }),
        ) => answer_for(log, "Delete", &expected, &id, respond_to, response),
        (
            ResourceRequest::Action { id, respond_to, .. },
            Some(Expectation::Action {
                id: expected,
                response,
            }),
        ) => answer_for(log, "Action", &expected, &id, respond_to, response),
        (ResourceRequest::Query { respond_to, .. }, Some(Expectation::Query { response })) => {
            answer(respond_to, response)
        }
        (
            ResourceRequest::Partition { key, respond_to },
            Some(Expectation::Partition {
                key: expected,
                response,
            }),
        ) => answer_for(log, "Partition", &expected, &key, respond_to, response),
        (request, Some(expectation)) => record(
            log,
            format!("Unexpected request {request:?}, expected {}", expectation.name()),
        ),
        (request, None) => record(log, format!("Unexpected request {request:?}, none expected")),
    }
}

/// A mock client with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Actor>::new();
/// mock.expect_get(buyer_id.clone()).return_ok(Some(buyer));
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    unexpected: Log,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();
        let unexpected: Log = Arc::new(Mutex::new(Vec::new()));
        let log = unexpected.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                // Release the lock before answering.
                let expectation = queue
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop_front();
                serve(request, expectation, &log);
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            unexpected,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn builder<R>(
        &self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    /// Expects an `insert` operation.
    pub fn expect_insert(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Insert { response })
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Expects a `query` operation. The filter itself is not evaluated.
    pub fn expect_query(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::Query { response })
    }

    /// Expects a `list_partition` operation for `key`.
    pub fn expect_partition(&mut self, key: T::Partition) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(move |response| Expectation::Partition { key, response })
    }

    /// Verifies that every request was expected and every expectation was met.
    pub fn verify(&self) {
        let unexpected = self
            .unexpected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if !unexpected.is_empty() {
            panic!("Mock received unexpected requests: {unexpected:#?}");
        }
        let remaining = self
            .expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder finishing an expectation with its response.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.make)(response);
        self.expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(expectation);
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }
}

// =============================================================================
// LEGACY HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test answers each request by hand, which allows asserting on the exact payload.
/// Consider [`MockClient`] for a more fluent API.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Query request
pub async fn expect_query<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Filter<T>, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Query { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Crate {
        id: u32,
        label: String,
    }

    #[derive(Debug)]
    struct CrateCreate {
        label: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("crate error")]
    struct CrateError;

    #[async_trait]
    impl ActorEntity for Crate {
        type Id = u32;
        type Partition = ();
        type Create = CrateCreate;
        type Update = ();
        type Action = ();
        type ActionResult = ();
        type Context = ();
        type Error = CrateError;

        fn assign_id(sequence: u32) -> u32 {
            sequence
        }
        fn id(&self) -> &u32 {
            &self.id
        }
        fn partition(&self) {}
        fn from_create_params(id: u32, params: CrateCreate) -> Result<Self, CrateError> {
            Ok(Self {
                id,
                label: params.label,
            })
        }
        async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), CrateError> {
            Ok(())
        }
        async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), CrateError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_receiver_helpers_expose_payload() {
        let (client, mut receiver) = create_mock_client::<Crate>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(CrateCreate {
                    label: "olives".into(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.label, "olives");
        responder.send(Ok(1)).unwrap();

        assert_eq!(create_task.await.unwrap().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_query_filter_is_handed_to_the_test() {
        let (client, mut receiver) = create_mock_client::<Crate>(10);
        let task = tokio::spawn(async move { client.query(|c: &Crate| c.label == "figs").await });

        let (filter, responder) = expect_query(&mut receiver).await.unwrap();
        let figs = Crate {
            id: 2,
            label: "figs".into(),
        };
        assert!(filter(&figs));
        responder.send(Ok(vec![figs])).unwrap();

        assert_eq!(task.await.unwrap().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Crate>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(Crate {
            id: 1,
            label: "olives".into(),
        }));
        mock.expect_delete(1).return_err(FrameworkError::NotFound("1".into()));

        let client = mock.client();
        let id = client
            .create(CrateCreate {
                label: "olives".into(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(client.get(1).await.unwrap().unwrap().label, "olives");
        assert!(matches!(
            client.delete(1).await,
            Err(FrameworkError::NotFound(_))
        ));

        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_request_drops_the_reply() {
        let mut mock = MockClient::<Crate>::new();
        mock.expect_get(1).return_ok(None);

        let result = mock.client().get(2).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }

    #[tokio::test]
    #[should_panic(expected = "Get expected for 1 but received 2")]
    async fn test_verify_reports_a_mismatched_id() {
        let mut mock = MockClient::<Crate>::new();
        mock.expect_get(1).return_ok(None);

        let _ = mock.client().get(2).await;
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "none expected")]
    async fn test_verify_reports_a_request_nobody_expected() {
        let mock = MockClient::<Crate>::new();

        let result = mock.client().delete(7).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_keeps_serving_after_an_unexpected_request() {
        let mut mock = MockClient::<Crate>::new();
        mock.expect_get(1).return_ok(None);
        mock.expect_delete(3).return_ok(());
        let client = mock.client();

        assert!(matches!(
            client.delete(1).await,
            Err(FrameworkError::ActorDropped)
        ));
        assert!(client.delete(3).await.is_ok());

        let failures = mock
            .unexpected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].starts_with("Unexpected request"));
        assert!(failures[0].ends_with("expected Get"));
    }
}
