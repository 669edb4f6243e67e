//! Error types for the shop.

use std::fmt;
use thiserror::Error;

/// The places where a client or barber can block inside the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPoint {
    /// Waiting for the lock over the waiting and rejected counters.
    StateLock,
    /// An admitted client waiting for a free chair.
    Seat,
    /// A barber waiting for a client to sit down.
    Readiness,
}

impl fmt::Display for WaitPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WaitPoint::StateLock => "state lock",
            WaitPoint::Seat => "seat",
            WaitPoint::Readiness => "readiness signal",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while visiting or working in the shop.
///
/// A full waiting room is not an error; see [`Visit::Rejected`](crate::model::Visit::Rejected).
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ShopError {
    /// The caller was cancelled while blocked. No shop lock is held at any
    /// wait point, so shared state is left consistent.
    #[error("Interrupted while waiting on the {point}")]
    InterruptedWait { point: WaitPoint },
}
