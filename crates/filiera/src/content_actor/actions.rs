/// Moderation decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentAction {
    Approve,
    Reject,
}
