/// Custom actions for actors beyond CRUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorAction {
    Activate,
    Deactivate,
}
