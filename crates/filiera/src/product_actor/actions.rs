//! Stock operations on a [`Product`](crate::model::Product).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductAction {
    /// Reads the stock level without modifying it.
    CheckStock,
    /// Takes units out of stock; fails if fewer are available.
    ReserveStock(u32),
    /// Puts units back (cancelled orders, new harvest).
    Restock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductActionResult {
    CheckStock(u32),
    /// Units left after the reservation.
    ReserveStock { remaining: u32 },
    Restock { available: u32 },
}
