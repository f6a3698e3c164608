//! # ResourceActor
//!
//! The generic actor that owns every entity of one type. It runs in its own tokio task,
//! receives [`ResourceRequest`]s over a bounded channel and answers each one before
//! looking at the next, so no request ever observes another half-applied.
//!
//! Mutations (update, replace, action) are applied to a working copy; the stored entity
//! is only replaced once the hook succeeded and the uniqueness rule still holds. A failed
//! hook therefore leaves the store untouched.
//!
//! Besides the primary `BTreeMap<Id, T>` the actor maintains a partition index
//! (`HashMap<Partition, BTreeSet<Id>>`) that is kept in step on every commit.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    index: HashMap<T::Partition, BTreeSet<T::Id>>,
    next_id: u32,
    entity_type: &'static str,
}

fn boxed<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}

impl<T: ActorEntity> ResourceActor<T> {
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        // "Content" instead of "filiera::model::content::Content"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            index: HashMap::new(),
            next_id: 1,
            entity_type,
        };
        (actor, ResourceClient::new(sender))
    }

    pub async fn run(mut self, context: T::Context) {
        let entity_type = self.entity_type;
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::assign_id(self.next_id);
                    self.next_id = self.next_id.wrapping_add(1);
                    let result = match T::from_create_params(id, params) {
                        Ok(item) => self.admit(item, &context).await,
                        Err(e) => Err(boxed(e)),
                    };
                    self.log_outcome("Created", &result);
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Insert { entity, respond_to } => {
                    debug!(entity_type, id = %entity.id(), "Insert");
                    let result = self.admit(entity, &context).await;
                    self.log_outcome("Inserted", &result);
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(id, update, &context).await;
                    self.log_outcome("Updated", &result);
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Replace { entity, respond_to } => {
                    debug!(entity_type, id = %entity.id(), "Replace");
                    let result = self.replace(entity);
                    self.log_outcome("Replaced", &result);
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(id, &context).await;
                    self.log_outcome("Deleted", &result);
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = self.action(id, action, &context).await;
                    self.log_outcome("Action ok", &result);
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Query { filter, respond_to } => {
                    let items = self.query(&filter);
                    debug!(entity_type, matched = items.len(), "Query");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Partition { key, respond_to } => {
                    let items = self.partition(&key);
                    debug!(entity_type, ?key, matched = items.len(), "Partition");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Census { respond_to } => {
                    let counts = self
                        .index
                        .iter()
                        .map(|(key, ids)| (key.clone(), ids.len()))
                        .collect();
                    let _ = respond_to.send(Ok(counts));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    fn log_outcome<R>(&self, verb: &'static str, result: &Result<R, FrameworkError>) {
        let entity_type = self.entity_type;
        match result {
            Ok(_) => info!(entity_type, size = self.store.len(), "{verb}"),
            Err(e) => warn!(entity_type, error = %e, "{verb} failed"),
        }
    }

    /// Stores a new entity after the uniqueness checks and the `on_create` hook.
    async fn admit(&mut self, mut item: T, ctx: &T::Context) -> Result<T::Id, FrameworkError> {
        let id = item.id().clone();
        if self.store.contains_key(&id) {
            return Err(FrameworkError::Conflict(format!("{id} already exists")));
        }
        self.ensure_unique(&item)?;
        item.on_create(ctx).await.map_err(boxed)?;
        self.commit(item);
        Ok(id)
    }

    async fn update(
        &mut self,
        id: T::Id,
        update: T::Update,
        ctx: &T::Context,
    ) -> Result<T, FrameworkError> {
        let mut working = self.working_copy(&id)?;
        working.on_update(update, ctx).await.map_err(boxed)?;
        self.ensure_unique(&working)?;
        Ok(self.commit(working))
    }

    fn replace(&mut self, entity: T) -> Result<T, FrameworkError> {
        if !self.store.contains_key(entity.id()) {
            return Err(FrameworkError::NotFound(entity.id().to_string()));
        }
        self.ensure_unique(&entity)?;
        Ok(self.commit(entity))
    }

    async fn delete(&mut self, id: T::Id, ctx: &T::Context) -> Result<(), FrameworkError> {
        let item = self.working_copy(&id)?;
        item.on_delete(ctx).await.map_err(boxed)?;
        self.store.remove(&id);
        self.unindex(&item.partition(), &id);
        Ok(())
    }

    async fn action(
        &mut self,
        id: T::Id,
        action: T::Action,
        ctx: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let mut working = self.working_copy(&id)?;
        let result = working.handle_action(action, ctx).await.map_err(boxed)?;
        self.commit(working);
        Ok(result)
    }

    fn query(&self, filter: &Filter<T>) -> Vec<T> {
        self.store
            .values()
            .filter(|item| filter(item))
            .cloned()
            .collect()
    }

    fn partition(&self, key: &T::Partition) -> Vec<T> {
        self.index
            .get(key)
            .into_iter()
            .flatten()
            .filter_map(|id| self.store.get(id).cloned())
            .collect()
    }

    fn working_copy(&self, id: &T::Id) -> Result<T, FrameworkError> {
        self.store
            .get(id)
            .cloned()
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))
    }

    fn ensure_unique(&self, candidate: &T) -> Result<(), FrameworkError> {
        match self
            .store
            .values()
            .filter(|other| other.id() != candidate.id())
            .find(|other| candidate.conflicts_with(other))
        {
            Some(other) => Err(FrameworkError::Conflict(format!(
                "{} conflicts with {}",
                candidate.id(),
                other.id()
            ))),
            None => Ok(()),
        }
    }

    /// Writes `item` into the store, moving it between partitions if its key changed.
    fn commit(&mut self, item: T) -> T {
        let id = item.id().clone();
        let partition = item.partition();
        if let Some(previous) = self.store.get(&id).map(|p| p.partition()) {
            if previous != partition {
                self.unindex(&previous, &id);
            }
        }
        self.index
            .entry(partition)
            .or_default()
            .insert(id.clone());
        self.store.insert(id, item.clone());
        item
    }

    fn unindex(&mut self, partition: &T::Partition, id: &T::Id) {
        if let Some(ids) = self.index.get_mut(partition) {
            ids.remove(id);
            if ids.is_empty() {
                self.index.remove(partition);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Ticket {
        id: u32,
        owner: String,
        open: bool,
    }

    #[derive(Debug)]
    struct TicketCreate {
        owner: String,
    }

    #[derive(Debug)]
    struct Reassign(String);

    #[derive(Debug)]
    enum TicketAction {
        Close,
        FailAfterReopen,
    }

    #[derive(Debug, thiserror::Error)]
    enum TicketError {
        #[error("owner must not be blank")]
        BlankOwner,
        #[error("refused")]
        Refused,
    }

    #[async_trait]
    impl ActorEntity for Ticket {
        type Id = u32;
        type Partition = bool;
        type Create = TicketCreate;
        type Update = Reassign;
        type Action = TicketAction;
        type ActionResult = bool;
        type Context = ();
        type Error = TicketError;

        fn assign_id(sequence: u32) -> u32 {
            sequence
        }

        fn id(&self) -> &u32 {
            &self.id
        }

        fn partition(&self) -> bool {
            self.open
        }

        fn from_create_params(id: u32, params: TicketCreate) -> Result<Self, TicketError> {
            if params.owner.trim().is_empty() {
                return Err(TicketError::BlankOwner);
            }
            Ok(Self {
                id,
                owner: params.owner,
                open: true,
            })
        }

        fn conflicts_with(&self, other: &Self) -> bool {
            self.open && other.open && self.owner == other.owner
        }

        async fn on_update(&mut self, update: Reassign, _ctx: &()) -> Result<(), TicketError> {
            self.owner = update.0;
            Ok(())
        }

        async fn handle_action(
            &mut self,
            action: TicketAction,
            _ctx: &(),
        ) -> Result<bool, TicketError> {
            match action {
                TicketAction::Close => {
                    let changed = self.open;
                    self.open = false;
                    Ok(changed)
                }
                TicketAction::FailAfterReopen => {
                    self.open = true;
                    Err(TicketError::Refused)
                }
            }
        }
    }

    fn spawn() -> ResourceClient<Ticket> {
        let (actor, client) = ResourceActor::<Ticket>::new(8);
        tokio::spawn(actor.run(()));
        client
    }

    fn create(owner: &str) -> TicketCreate {
        TicketCreate {
            owner: owner.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let client = spawn();
        assert_eq!(client.create(create("ana")).await.unwrap(), 1);
        assert_eq!(client.create(create("bo")).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_conflicting_create_is_rejected() {
        let client = spawn();
        client.create(create("ana")).await.unwrap();
        let err = client.create(create("ana")).await.unwrap_err();
        assert!(matches!(err, FrameworkError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_insert_duplicate_id_conflicts() {
        let client = spawn();
        let ticket = Ticket {
            id: 7,
            owner: "ana".into(),
            open: false,
        };
        assert_eq!(client.insert(ticket.clone()).await.unwrap(), 7);
        let err = client.insert(ticket).await.unwrap_err();
        assert!(matches!(err, FrameworkError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_action_moves_entity_between_partitions() {
        let client = spawn();
        let a = client.create(create("ana")).await.unwrap();
        let b = client.create(create("bo")).await.unwrap();

        assert!(client.perform_action(a, TicketAction::Close).await.unwrap());

        let open = client.list_partition(true).await.unwrap();
        let closed = client.list_partition(false).await.unwrap();
        assert_eq!(open.iter().map(|t| t.id).collect::<Vec<_>>(), vec![b]);
        assert_eq!(closed.iter().map(|t| t.id).collect::<Vec<_>>(), vec![a]);

        let census = client.census().await.unwrap();
        assert_eq!(census.get(&true), Some(&1));
        assert_eq!(census.get(&false), Some(&1));
    }

    #[tokio::test]
    async fn test_failed_action_leaves_store_untouched() {
        let client = spawn();
        let id = client.create(create("ana")).await.unwrap();
        client.perform_action(id, TicketAction::Close).await.unwrap();

        let err = client
            .perform_action(id, TicketAction::FailAfterReopen)
            .await
            .unwrap_err();
        assert!(matches!(err, FrameworkError::EntityError(_)));

        let stored = client.get(id).await.unwrap().unwrap();
        assert!(!stored.open);
    }

    #[tokio::test]
    async fn test_update_checks_uniqueness_against_others() {
        let client = spawn();
        client.create(create("ana")).await.unwrap();
        let bo = client.create(create("bo")).await.unwrap();

        let err = client.update(bo, Reassign("ana".into())).await.unwrap_err();
        assert!(matches!(err, FrameworkError::Conflict(_)));
        assert_eq!(client.get(bo).await.unwrap().unwrap().owner, "bo");
    }

    #[tokio::test]
    async fn test_missing_entities_report_not_found() {
        let client = spawn();
        let ghost = Ticket {
            id: 99,
            owner: "nobody".into(),
            open: true,
        };
        assert!(matches!(
            client.replace(ghost).await,
            Err(FrameworkError::NotFound(id)) if id == "99"
        ));
        assert!(matches!(
            client.delete(99).await,
            Err(FrameworkError::NotFound(_))
        ));
        assert!(client.get(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_query_and_delete() {
        let client = spawn();
        let a = client.create(create("ana")).await.unwrap();
        client.create(create("bo")).await.unwrap();

        let found = client
            .query(|t: &Ticket| t.owner.starts_with('a'))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        client.delete(a).await.unwrap();
        assert!(client.get(a).await.unwrap().is_none());
        assert_eq!(client.list_partition(true).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_create_params_surface_entity_error() {
        let client = spawn();
        let err = client.create(create("  ")).await.unwrap_err();
        let typed = err.into_entity_error::<TicketError>().unwrap();
        assert!(matches!(typed, TicketError::BlankOwner));
    }
}
