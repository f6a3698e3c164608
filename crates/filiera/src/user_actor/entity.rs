use super::actions::UserAction;
use super::error::UserError;
use crate::model::{
    digest_password, non_blank, RegistrationState, User, UserCreate, UserId, UserUpdate,
};
use actor_framework::ActorEntity;
use async_trait::async_trait;

fn validated_email(email: &str) -> Result<String, UserError> {
    let email = email.trim().to_lowercase();
    if email.contains('@') {
        Ok(email)
    } else {
        Err(UserError::ValidationError(format!("invalid email: {email:?}")))
    }
}

fn validated_password(password: &str) -> Result<String, UserError> {
    if password.trim().is_empty() {
        return Err(UserError::ValidationError("password cannot be blank".into()));
    }
    Ok(digest_password(password))
}

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Partition = RegistrationState;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = UserAction;
    type ActionResult = bool;
    type Context = ();
    type Error = UserError;

    fn assign_id(sequence: u32) -> UserId {
        UserId(sequence)
    }

    fn id(&self) -> &UserId {
        &self.id
    }

    fn partition(&self) -> RegistrationState {
        self.registration
    }

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, UserError> {
        let username = non_blank(&params.username)
            .ok_or_else(|| UserError::ValidationError("username cannot be blank".into()))?;
        Ok(Self {
            id,
            username,
            email: validated_email(&params.email)?,
            password_digest: validated_password(&params.password)?,
            permissions: params.permissions,
            registration: RegistrationState::Pending,
        })
    }

    /// One account per email.
    fn conflicts_with(&self, other: &Self) -> bool {
        self.email == other.email
    }

    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), UserError> {
        if let Some(username) = update.username {
            self.username = non_blank(&username)
                .ok_or_else(|| UserError::ValidationError("username cannot be blank".into()))?;
        }
        if let Some(email) = update.email {
            self.email = validated_email(&email)?;
        }
        if let Some(password) = update.password {
            self.password_digest = validated_password(&password)?;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: UserAction, _ctx: &()) -> Result<bool, UserError> {
        Ok(match action {
            UserAction::ApproveRegistration => {
                let changed = self.registration == RegistrationState::Pending;
                self.registration = RegistrationState::Approved;
                changed
            }
            UserAction::Grant(permission) => self.permissions.insert(permission),
            UserAction::Revoke(permission) => self.permissions.remove(&permission),
        })
    }
}
