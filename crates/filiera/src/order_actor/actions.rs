/// Status transitions. Each returns whether the status changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    Confirm,
    StartProcessing,
    Ship,
    Deliver,
    /// Releases the reserved stock.
    Cancel,
}
