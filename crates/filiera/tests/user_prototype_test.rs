use filiera::clients::UserClient;
use filiera::model::{Permission, PermissionSet, User};
use filiera::registry::PrototypeRegistry;
use filiera::user_actor::UserError;
use std::sync::Arc;

fn spawn_users(registry: PrototypeRegistry<User>) -> (UserClient, tokio::task::JoinHandle<()>) {
    let (actor, client) = filiera::user_actor::new(16);
    let handle = tokio::spawn(actor.run(()));
    (UserClient::new(client, Arc::new(registry)), handle)
}

fn producer_registry() -> PrototypeRegistry<User> {
    let mut registry = PrototypeRegistry::new();
    registry
        .register("Producer", User::template(PermissionSet::of(["certifications"])))
        .unwrap();
    registry
}

#[tokio::test]
async fn test_user_created_from_prototype_holds_its_permissions() {
    let (users, handle) = spawn_users(producer_registry());

    let id = users
        .create_user("Producer", "alice", "pw", "A@B.com")
        .await
        .unwrap();
    let alice = actor_framework::ActorClient::fetch(&users, id).await.unwrap();

    assert_eq!(alice.username, "alice");
    assert_eq!(alice.email, "a@b.com");
    assert!(alice.permissions.contains("certifications"));
    assert!(!alice.is_approved());

    // The registry still hands out the untouched template.
    users.grant(id, Permission::new("products_manage")).await.unwrap();
    let template = users.prototypes().get_copy("Producer").unwrap();
    assert_eq!(template.permissions.len(), 1);

    drop(users);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_duplicate_email_is_a_conflict() {
    let (users, handle) = spawn_users(producer_registry());

    users
        .create_user("Producer", "alice", "pw", "a@b.com")
        .await
        .unwrap();
    let err = users
        .create_user("Producer", "alice2", "pw", " A@b.COM ")
        .await
        .unwrap_err();
    assert!(matches!(err, UserError::Conflict(_)));

    drop(users);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_authentication_requires_approval() {
    let (users, handle) = spawn_users(producer_registry());
    let id = users
        .create_user("Producer", "alice", "pw", "a@b.com")
        .await
        .unwrap();

    assert!(matches!(
        users.authenticate("a@b.com", "pw").await,
        Err(UserError::NotApproved(_))
    ));
    assert_eq!(users.list_pending_registrations().await.unwrap().len(), 1);

    assert!(users.approve_registration(id).await.unwrap());
    assert!(!users.approve_registration(id).await.unwrap());
    assert!(users.list_pending_registrations().await.unwrap().is_empty());

    assert_eq!(users.authenticate("A@B.COM", "pw").await.unwrap().id, id);
    assert_eq!(
        users.authenticate("a@b.com", "wrong").await,
        Err(UserError::InvalidCredentials)
    );
    assert_eq!(
        users.authenticate("nobody@b.com", "pw").await,
        Err(UserError::InvalidCredentials)
    );

    drop(users);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_grant_and_revoke_report_changes() {
    let (users, handle) = spawn_users(producer_registry());
    let id = users
        .create_user("Producer", "alice", "pw", "a@b.com")
        .await
        .unwrap();

    assert!(!users.grant(id, Permission::new("certifications")).await.unwrap());
    assert!(users
        .revoke(id, Permission::new("certifications"))
        .await
        .unwrap());
    assert!(!users.revoke(id, Permission::new("certifications")).await.unwrap());

    drop(users);
    handle.await.unwrap();
}
