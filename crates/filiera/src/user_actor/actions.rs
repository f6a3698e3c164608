use crate::model::Permission;

/// Custom actions for user accounts.
#[derive(Debug, Clone)]
pub enum UserAction {
    /// Moves a pending registration to approved.
    ApproveRegistration,
    Grant(Permission),
    Revoke(Permission),
}
