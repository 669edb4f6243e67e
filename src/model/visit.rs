use serde::Serialize;

/// Outcome of a single client's visit to the shop.
///
/// Rejection is a normal outcome, not an error: a full waiting room simply
/// sends the client away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// The client took the chair, was served and left.
    Served,
    /// The waiting room was full. Carries the running rejection total,
    /// including this client.
    Rejected { total_rejected: u64 },
}

impl Visit {
    pub fn is_served(&self) -> bool {
        matches!(self, Visit::Served)
    }
}

/// Point-in-time view of the shop counters, read under the state lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShopSnapshot {
    pub capacity: usize,
    pub chairs: usize,
    pub waiting: usize,
    pub rejected: u64,
    pub served: u64,
}
