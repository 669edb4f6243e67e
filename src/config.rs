//! # Shop Configuration
//!
//! Run parameters for a simulation. [`ShopConfig::default`] reproduces the
//! reference run: a waiting room of two, one barber, five clients arriving
//! every 500ms.

use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;

/// Errors raised when a configuration cannot drive a shop.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// The seat lock needs at least one permit or nobody could ever sit down.
    #[error("Shop needs at least one chair")]
    NoChairs,

    /// Each chair is a seat-lock permit, and the lock has a hard permit limit.
    #[error("Too many chairs: {chairs} (at most {max})")]
    TooManyChairs { chairs: usize, max: usize },
}

/// How long a haircut takes, seen from each side of the hand-off.
///
/// The client holds the chair for `seat_hold`, the barber is busy for
/// `service`. The two run concurrently and are not tied together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HaircutTiming {
    pub seat_hold: Duration,
    pub service: Duration,
}

impl HaircutTiming {
    /// One haircut duration applied to both the client and the barber.
    pub fn symmetric(duration: Duration) -> Self {
        Self {
            seat_hold: duration,
            service: duration,
        }
    }

    /// The historical split timing: clients hold the chair for 1000ms while
    /// the barber works for 1500ms.
    pub fn reference() -> Self {
        Self {
            seat_hold: Duration::from_millis(1000),
            service: Duration::from_millis(1500),
        }
    }
}

impl Default for HaircutTiming {
    fn default() -> Self {
        Self::symmetric(Duration::from_millis(1000))
    }
}

/// Parameters for one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopConfig {
    /// Maximum number of clients waiting or seated at once.
    pub capacity: usize,
    /// Number of physical chairs guarded by the seat lock.
    pub chairs: usize,
    /// Barbers spawned at startup. Zero is allowed and leaves the queue undrained.
    pub barbers: u32,
    /// Arrivals to simulate.
    pub clients: u32,
    /// Delay between consecutive arrivals.
    pub arrival_interval: Duration,
    pub timing: HaircutTiming,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            capacity: 2,
            chairs: 1,
            barbers: 1,
            clients: 5,
            arrival_interval: Duration::from_millis(500),
            timing: HaircutTiming::default(),
        }
    }
}

impl ShopConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chairs == 0 {
            return Err(ConfigError::NoChairs);
        }
        if self.chairs > Semaphore::MAX_PERMITS {
            return Err(ConfigError::TooManyChairs {
                chairs: self.chairs,
                max: Semaphore::MAX_PERMITS,
            });
        }
        Ok(())
    }
}
