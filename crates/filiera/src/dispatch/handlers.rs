//! The marketplace commands.
//!
//! Handlers only parse parameters and call a client; every rule lives in the resource
//! actors. Permission requirements are attached by the configurator, not here.

use super::{CommandError, Handler, Reply, Request};
use crate::clients::{ContentClient, EventClient, PackageClient, ProductClient, UserClient};
use crate::model::{
    ActorId, ContentId, ContentKind, ContentState, ContentSubmission, EventCreate, EventId,
    PackageCreate, ProductCreate, ProductId, UserId,
};
use crate::session::{Identity, SessionState};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

fn current<'a>(session: &'a SessionState, request: &Request) -> Result<&'a Identity, CommandError> {
    session
        .current()
        .ok_or_else(|| CommandError::NotLoggedIn(request.method.clone()))
}

/// `login name password`: records an unverified identity.
pub struct Login;

#[async_trait]
impl Handler for Login {
    async fn handle(
        &self,
        session: &mut SessionState,
        request: &Request,
    ) -> Result<Reply, CommandError> {
        const USAGE: &str = "name password";
        let name = request.param(0, USAGE)?;
        let password = request.param(1, USAGE)?;
        let identity = session.login(name, password)?;
        Ok(Reply::LoggedIn {
            name: identity.name.clone(),
        })
    }
}

pub struct AnonymousLogin;

#[async_trait]
impl Handler for AnonymousLogin {
    async fn handle(
        &self,
        session: &mut SessionState,
        _request: &Request,
    ) -> Result<Reply, CommandError> {
        Ok(Reply::LoggedIn {
            name: session.anonymous_login().name.clone(),
        })
    }
}

/// `authenticate email password`: logs in as a verified, approved account.
pub struct Authenticate {
    pub users: UserClient,
}

#[async_trait]
impl Handler for Authenticate {
    async fn handle(
        &self,
        session: &mut SessionState,
        request: &Request,
    ) -> Result<Reply, CommandError> {
        const USAGE: &str = "email password";
        let user = self
            .users
            .authenticate(request.param(0, USAGE)?, request.param(1, USAGE)?)
            .await?;
        let identity = session.establish(Identity::from(user));
        Ok(Reply::LoggedIn {
            name: identity.name.clone(),
        })
    }
}

pub struct RegisterUser {
    pub users: UserClient,
}

#[async_trait]
impl Handler for RegisterUser {
    async fn handle(
        &self,
        _session: &mut SessionState,
        request: &Request,
    ) -> Result<Reply, CommandError> {
        const USAGE: &str = "prototype username password email";
        let id = self
            .users
            .create_user(
                request.param(0, USAGE)?,
                request.param(1, USAGE)?,
                request.param(2, USAGE)?,
                request.param(3, USAGE)?,
            )
            .await?;
        Ok(Reply::Created {
            resource: "user",
            id: id.to_string(),
        })
    }
}

pub struct ApproveRegistration {
    pub users: UserClient,
}

#[async_trait]
impl Handler for ApproveRegistration {
    async fn handle(
        &self,
        _session: &mut SessionState,
        request: &Request,
    ) -> Result<Reply, CommandError> {
        let id: UserId = request.parse_param(0, "user id", "user_id")?;
        let changed = self.users.approve_registration(id).await?;
        Ok(Reply::RegistrationApproved { id, changed })
    }
}

/// `submit_content kind name description...`, credited to the current identity.
pub struct SubmitContent {
    pub content: ContentClient,
}

#[async_trait]
impl Handler for SubmitContent {
    async fn handle(
        &self,
        session: &mut SessionState,
        request: &Request,
    ) -> Result<Reply, CommandError> {
        const USAGE: &str = "kind name description...";
        let submitter = current(session, request)?.name.clone();
        let kind: ContentKind = request.parse_param(0, "content kind", USAGE)?;
        let submission = ContentSubmission::new(
            kind,
            request.param(1, USAGE)?,
            request.text_from(2, USAGE)?,
        )
        .submitted_by(submitter);
        let id = self.content.submit(submission).await?;
        Ok(Reply::Created {
            resource: "content",
            id: id.to_string(),
        })
    }
}

/// `create_certificate name description...`
pub struct CreateCertificate {
    pub content: ContentClient,
}

#[async_trait]
impl Handler for CreateCertificate {
    async fn handle(
        &self,
        session: &mut SessionState,
        request: &Request,
    ) -> Result<Reply, CommandError> {
        const USAGE: &str = "name description...";
        let mut submission = ContentSubmission::new(
            ContentKind::Certification,
            request.param(0, USAGE)?,
            request.text_from(1, USAGE)?,
        );
        if let Some(identity) = session.current() {
            submission = submission.submitted_by(identity.name.clone());
        }
        let id = self.content.submit(submission).await?;
        Ok(Reply::Created {
            resource: "certificate",
            id: id.to_string(),
        })
    }
}

/// `approve_content id` / `reject_content id`
pub struct Moderate {
    content: ContentClient,
    decision: ContentState,
}

impl Moderate {
    pub fn approve(content: ContentClient) -> Self {
        Self {
            content,
            decision: ContentState::Approved,
        }
    }

    pub fn reject(content: ContentClient) -> Self {
        Self {
            content,
            decision: ContentState::Rejected,
        }
    }
}

#[async_trait]
impl Handler for Moderate {
    async fn handle(
        &self,
        _session: &mut SessionState,
        request: &Request,
    ) -> Result<Reply, CommandError> {
        let id: ContentId = request.parse_param(0, "content id", "content_id")?;
        let changed = if self.decision == ContentState::Approved {
            self.content.approve(id).await?
        } else {
            self.content.reject(id).await?
        };
        Ok(Reply::Moderated {
            id,
            state: self.decision,
            changed,
        })
    }
}

/// `create_product producer_id name category price quantity description...`
pub struct CreateProduct {
    pub products: ProductClient,
}

#[async_trait]
impl Handler for CreateProduct {
    async fn handle(
        &self,
        _session: &mut SessionState,
        request: &Request,
    ) -> Result<Reply, CommandError> {
        const USAGE: &str = "producer_id name category price quantity description...";
        let params = ProductCreate {
            producer_id: request.parse_param::<ActorId>(0, "producer id", USAGE)?,
            name: request.param(1, USAGE)?.to_string(),
            category: request.param(2, USAGE)?.to_string(),
            price: request.parse_param(3, "price", USAGE)?,
            quantity: request.parse_param(4, "quantity", USAGE)?,
            description: request
                .params
                .get(5..)
                .map(|rest| rest.join(" "))
                .unwrap_or_default(),
            cultivation_method: None,
            certifications: Vec::new(),
            production_date: Utc::now().date_naive(),
        };
        let id = self.products.create_product(params).await?;
        Ok(Reply::Created {
            resource: "product",
            id: id.to_string(),
        })
    }
}

/// `create_event organizer_id start location title...` with an RFC 3339 start.
pub struct CreateEvent {
    pub events: EventClient,
}

#[async_trait]
impl Handler for CreateEvent {
    async fn handle(
        &self,
        _session: &mut SessionState,
        request: &Request,
    ) -> Result<Reply, CommandError> {
        const USAGE: &str = "organizer_id start location title...";
        let params = EventCreate {
            organizer_id: request.parse_param(0, "organizer id", USAGE)?,
            starts_at: request.parse_param::<DateTime<Utc>>(1, "start", USAGE)?,
            location: request.param(2, USAGE)?.to_string(),
            title: request.text_from(3, USAGE)?,
            description: String::new(),
        };
        let id = self.events.create_event(params).await?;
        Ok(Reply::Created {
            resource: "event",
            id: id.to_string(),
        })
    }
}

/// `register_event event_id actor_id role`
pub struct RegisterEvent {
    pub events: EventClient,
}

#[async_trait]
impl Handler for RegisterEvent {
    async fn handle(
        &self,
        _session: &mut SessionState,
        request: &Request,
    ) -> Result<Reply, CommandError> {
        const USAGE: &str = "event_id actor_id role";
        let event: EventId = request.parse_param(0, "event id", USAGE)?;
        let participation = self
            .events
            .register_participant(
                event,
                request.parse_param(1, "actor id", USAGE)?,
                request.parse_param(2, "role", USAGE)?,
            )
            .await?;
        Ok(Reply::Participating {
            event,
            participation,
        })
    }
}

/// `distributor_create_package distributor_id name product_id...`
pub struct CreatePackage {
    pub packages: PackageClient,
}

#[async_trait]
impl Handler for CreatePackage {
    async fn handle(
        &self,
        _session: &mut SessionState,
        request: &Request,
    ) -> Result<Reply, CommandError> {
        const USAGE: &str = "distributor_id name product_id...";
        request.param(2, USAGE)?;
        let products = (2..request.params.len())
            .map(|index| request.parse_param::<ProductId>(index, "product id", USAGE))
            .collect::<Result<Vec<_>, _>>()?;
        let params = PackageCreate {
            distributor_id: request.parse_param(0, "distributor id", USAGE)?,
            name: request.param(1, USAGE)?.to_string(),
            products,
        };
        let id = self.packages.create_package(params).await?;
        Ok(Reply::Created {
            resource: "package",
            id: id.to_string(),
        })
    }
}

pub struct WhoAmI;

#[async_trait]
impl Handler for WhoAmI {
    async fn handle(
        &self,
        session: &mut SessionState,
        _request: &Request,
    ) -> Result<Reply, CommandError> {
        Ok(Reply::WhoAmI(session.current().cloned()))
    }
}
