//! # Domain Model
//!
//! Plain data structures for the marketplace. Each resource implements
//! [`ActorEntity`](actor_framework::ActorEntity) in its `*_actor` module; this module only
//! holds the data, its invariants and the typed identifiers.

pub mod actor;
pub mod content;
pub mod event;
pub mod order;
pub mod package;
pub mod permission;
pub mod product;
pub mod supply_chain;
pub mod user;

pub use actor::*;
pub use content::*;
pub use event::*;
pub use order::*;
pub use package::*;
pub use permission::*;
pub use product::*;
pub use supply_chain::*;
pub use user::*;

/// Failure to parse an identifier from text (e.g. a command parameter).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id: {value:?}")]
pub struct IdParseError {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a sequential, actor-assigned identifier.
///
/// Displays as `<prefix>_<n>` and parses from either that form or the bare number.
macro_rules! sequential_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::model::IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                let digits = trimmed
                    .strip_prefix(concat!($prefix, "_"))
                    .unwrap_or(trimmed);
                digits.parse().map(Self).map_err(|_| $crate::model::IdParseError {
                    kind: $prefix,
                    value: s.to_string(),
                })
            }
        }
    };
}

sequential_id!(
    /// Identifier of a user account.
    UserId, "user"
);
sequential_id!(ContentId, "content");
sequential_id!(ProductId, "product");
sequential_id!(OrderId, "order");
sequential_id!(EventId, "event");
sequential_id!(ParticipationId, "participation");
sequential_id!(PackageId, "package");
sequential_id!(
    /// Identifier of a supply chain.
    SupplyChainId, "chain"
);

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// `false` for negative values and NaN.
pub(crate) fn non_negative(value: f64) -> bool {
    value >= 0.0
}
