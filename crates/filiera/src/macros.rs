//! Boilerplate shared by every resource module.

/// Implements `From<FrameworkError>` and `From<String>` for a resource error.
///
/// A domain error raised inside the actor comes back boxed in
/// `FrameworkError::EntityError`; it is downcast back to the resource error so callers can
/// match on it. The error must have `NotFound`, `Conflict` and `ActorCommunicationError`
/// variants holding a `String`.
macro_rules! framework_error_conversions {
    ($error:ident) => {
        impl From<actor_framework::FrameworkError> for $error {
            fn from(e: actor_framework::FrameworkError) -> Self {
                use actor_framework::FrameworkError;
                match e.into_entity_error::<$error>() {
                    Ok(typed) => typed,
                    Err(FrameworkError::NotFound(id)) => $error::NotFound(id),
                    Err(FrameworkError::Conflict(reason)) => $error::Conflict(reason),
                    Err(other) => $error::ActorCommunicationError(other.to_string()),
                }
            }
        }

        impl From<String> for $error {
            fn from(msg: String) -> Self {
                $error::ActorCommunicationError(msg)
            }
        }
    };
}

/// Declares a cloneable client wrapping `ResourceClient<Entity>` and implements
/// [`ActorClient`](actor_framework::ActorClient) for it.
///
/// `resource_client!(Product, ProductError)` declares `ProductClient`; the
/// `Name => Entity` form picks the name explicitly.
macro_rules! resource_client {
    ($(#[$meta:meta])* $entity:ident, $error:ty) => {
        paste::paste! {
            resource_client!($(#[$meta])* [<$entity Client>] => $entity, $error);
        }
    };
    ($(#[$meta:meta])* $client:ident => $entity:ty, $error:ty) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $client {
            inner: actor_framework::ResourceClient<$entity>,
        }

        impl $client {
            pub fn new(inner: actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }

        impl actor_framework::ActorClient<$entity> for $client {
            type Error = $error;

            fn inner(&self) -> &actor_framework::ResourceClient<$entity> {
                &self.inner
            }
        }
    };
}
