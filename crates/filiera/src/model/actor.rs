//! A marketplace participant: producer, distributor, curator, buyer...
//!
//! # Actor Framework
//! Managed by the [`actor_store`](crate::actor_store) resource actor, which indexes actors
//! by [`ActorType`]. The id is immutable once assigned and equality is id-based, so an
//! updated copy of an actor still compares equal to the original.

use crate::actor_store::ActorError;
use crate::model::{non_blank, non_negative};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Identifier of an actor. Caller supplied, or a UUID v4 when absent.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    pub fn new(id: impl AsRef<str>) -> Result<Self, ActorError> {
        non_blank(id.as_ref())
            .map(Self)
            .ok_or_else(|| ActorError::ValidationError("actor id cannot be blank".into()))
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ActorId {
    type Err = ActorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// The fixed set of actor roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorType {
    Producer,
    Transformer,
    Distributor,
    Curator,
    Animator,
    Buyer,
    PlatformManager,
    GeneralUser,
}

impl ActorType {
    pub const ALL: [ActorType; 8] = [
        ActorType::Producer,
        ActorType::Transformer,
        ActorType::Distributor,
        ActorType::Curator,
        ActorType::Animator,
        ActorType::Buyer,
        ActorType::PlatformManager,
        ActorType::GeneralUser,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActorType::Producer => "Producer",
            ActorType::Transformer => "Transformer",
            ActorType::Distributor => "Distributor",
            ActorType::Curator => "Curator",
            ActorType::Animator => "Animator",
            ActorType::Buyer => "Buyer",
            ActorType::PlatformManager => "PlatformManager",
            ActorType::GeneralUser => "GeneralUser",
        }
    }
}

impl fmt::Display for ActorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActorType {
    type Err = ActorError;

    /// Case-insensitive; underscores are ignored (`platform_manager`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.chars().filter(|c| *c != '_').collect();
        ActorType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| ActorError::ValidationError(format!("unknown actor type: {s}")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProducerProfile {
    pub cultivation_methods: Vec<String>,
    pub certifications: Vec<String>,
    pub farm_size_hectares: f64,
    pub established_year: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformerProfile {
    pub transformation_processes: Vec<String>,
    pub quality_certifications: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributorProfile {
    pub warehouse_capacity_m3: f64,
    pub delivery_radius_km: f64,
    pub delivery_methods: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratorProfile {
    pub expertise_areas: Vec<String>,
    pub daily_review_capacity: u32,
}

impl Default for CuratorProfile {
    fn default() -> Self {
        Self {
            expertise_areas: Vec::new(),
            daily_review_capacity: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatorProfile {
    pub specialization_areas: Vec<String>,
    pub max_simultaneous_events: u32,
}

impl Default for AnimatorProfile {
    fn default() -> Self {
        Self {
            specialization_areas: Vec::new(),
            max_simultaneous_events: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuyerProfile {
    pub max_order_budget: f64,
    pub prefers_organic: bool,
}

/// The actor's role together with its role-specific attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActorKind {
    Producer(ProducerProfile),
    Transformer(TransformerProfile),
    Distributor(DistributorProfile),
    Curator(CuratorProfile),
    Animator(AnimatorProfile),
    Buyer(BuyerProfile),
    PlatformManager,
    GeneralUser,
}

impl ActorKind {
    pub fn actor_type(&self) -> ActorType {
        match self {
            ActorKind::Producer(_) => ActorType::Producer,
            ActorKind::Transformer(_) => ActorType::Transformer,
            ActorKind::Distributor(_) => ActorType::Distributor,
            ActorKind::Curator(_) => ActorType::Curator,
            ActorKind::Animator(_) => ActorType::Animator,
            ActorKind::Buyer(_) => ActorType::Buyer,
            ActorKind::PlatformManager => ActorType::PlatformManager,
            ActorKind::GeneralUser => ActorType::GeneralUser,
        }
    }

    fn validate(&self) -> Result<(), ActorError> {
        let invalid = |msg: &str| Err(ActorError::ValidationError(msg.to_string()));
        match self {
            ActorKind::Producer(p) => {
                if !non_negative(p.farm_size_hectares) {
                    return invalid("farm size cannot be negative");
                }
                if let Some(year) = p.established_year {
                    if !(1800..=Utc::now().year()).contains(&year) {
                        return invalid("established year out of range");
                    }
                }
            }
            ActorKind::Distributor(d) => {
                if !non_negative(d.warehouse_capacity_m3) {
                    return invalid("warehouse capacity cannot be negative");
                }
                if !non_negative(d.delivery_radius_km) {
                    return invalid("delivery radius cannot be negative");
                }
            }
            ActorKind::Curator(c) if c.daily_review_capacity == 0 => {
                return invalid("daily review capacity must be positive");
            }
            ActorKind::Animator(a) if a.max_simultaneous_events == 0 => {
                return invalid("max simultaneous events must be positive");
            }
            ActorKind::Buyer(b) if !non_negative(b.max_order_budget) => {
                return invalid("max order budget cannot be negative");
            }
            _ => {}
        }
        Ok(())
    }
}

impl From<ActorType> for ActorKind {
    /// The kind with default attributes for `actor_type`.
    fn from(actor_type: ActorType) -> Self {
        match actor_type {
            ActorType::Producer => ActorKind::Producer(ProducerProfile::default()),
            ActorType::Transformer => ActorKind::Transformer(TransformerProfile::default()),
            ActorType::Distributor => ActorKind::Distributor(DistributorProfile::default()),
            ActorType::Curator => ActorKind::Curator(CuratorProfile::default()),
            ActorType::Animator => ActorKind::Animator(AnimatorProfile::default()),
            ActorType::Buyer => ActorKind::Buyer(BuyerProfile::default()),
            ActorType::PlatformManager => ActorKind::PlatformManager,
            ActorType::GeneralUser => ActorKind::GeneralUser,
        }
    }
}

/// Deserializes through the same checks as [`Actor::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ActorRecord")]
pub struct Actor {
    id: ActorId,
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    kind: ActorKind,
    active: bool,
}

#[derive(Deserialize)]
struct ActorRecord {
    id: String,
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    kind: ActorKind,
    active: bool,
}

impl TryFrom<ActorRecord> for Actor {
    type Error = ActorError;

    fn try_from(record: ActorRecord) -> Result<Self, ActorError> {
        let mut actor = Actor::new(&record.name, &record.email, record.kind)?
            .with_id(ActorId::new(&record.id)?);
        actor.phone = record.phone.as_deref().and_then(non_blank);
        actor.address = record.address.as_deref().and_then(non_blank);
        actor.active = record.active;
        Ok(actor)
    }
}

fn normalize_email(email: &str) -> Result<String, ActorError> {
    let email = email.trim().to_lowercase();
    if email.contains('@') && email.contains('.') {
        Ok(email)
    } else {
        Err(ActorError::ValidationError(format!("invalid email: {email:?}")))
    }
}

impl Actor {
    /// Creates an active actor with a generated id.
    pub fn new(name: &str, email: &str, kind: ActorKind) -> Result<Self, ActorError> {
        kind.validate()?;
        Ok(Self {
            id: ActorId::generate(),
            name: non_blank(name)
                .ok_or_else(|| ActorError::ValidationError("name cannot be blank".into()))?,
            email: normalize_email(email)?,
            phone: None,
            address: None,
            kind,
            active: true,
        })
    }

    /// Replaces the generated id with a caller-supplied one.
    pub fn with_id(mut self, id: ActorId) -> Self {
        self.id = id;
        self
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = non_blank(phone);
        self
    }

    pub fn with_address(mut self, address: &str) -> Self {
        self.address = non_blank(address);
        self
    }

    pub fn id(&self) -> &ActorId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn kind(&self) -> &ActorKind {
        &self.kind
    }

    pub fn actor_type(&self) -> ActorType {
        self.kind.actor_type()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), ActorError> {
        self.name = non_blank(name)
            .ok_or_else(|| ActorError::ValidationError("name cannot be blank".into()))?;
        Ok(())
    }

    pub fn set_email(&mut self, email: &str) -> Result<(), ActorError> {
        self.email = normalize_email(email)?;
        Ok(())
    }

    pub fn set_phone(&mut self, phone: &str) {
        self.phone = non_blank(phone);
    }

    pub fn set_address(&mut self, address: &str) {
        self.address = non_blank(address);
    }

    pub fn set_kind(&mut self, kind: ActorKind) -> Result<(), ActorError> {
        kind.validate()?;
        self.kind = kind;
        Ok(())
    }

    /// Returns `true` if the flag changed.
    pub(crate) fn set_active(&mut self, active: bool) -> bool {
        let changed = self.active != active;
        self.active = active;
        changed
    }

    pub fn can_upload_content(&self) -> bool {
        matches!(
            self.actor_type(),
            ActorType::Producer | ActorType::Transformer | ActorType::Distributor
        )
    }

    pub fn can_approve_content(&self) -> bool {
        self.actor_type() == ActorType::Curator
    }

    pub fn can_organize_events(&self) -> bool {
        self.actor_type() == ActorType::Animator
    }

    pub fn can_make_purchases(&self) -> bool {
        matches!(self.actor_type(), ActorType::Buyer | ActorType::Distributor)
    }
}

impl PartialEq for Actor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Actor {}

impl Hash for Actor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Partial changes applied through [`ActorStore::patch`](crate::clients::ActorStore::patch).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActorPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub kind: Option<ActorKind>,
}

/// Payload for registering an actor with a store-assigned id.
#[derive(Debug, Clone)]
pub struct ActorCreate {
    pub name: String,
    pub email: String,
    pub kind: ActorKind,
}
