//! # Shop Observers
//!
//! The shop reports what happens inside it as a stream of [`ShopEvent`]s sent
//! to a [`ShopObserver`]. The core emits events at fixed points and does not
//! care where they end up.
//!
//! - [`TracingObserver`] turns events into structured `tracing` logs. This is
//!   what the binary uses.
//! - [`RecordingObserver`] keeps a timestamped log in memory for tests.

pub mod recording;

pub use recording::*;

use crate::model::{BarberId, ClientId};
use tracing::info;

/// Something observable that happened in the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopEvent {
    ClientArrived { client: ClientId },
    ClientSeated { client: ClientId },
    ClientServed { client: ClientId },
    /// The client left the chair and the seat is free again.
    ClientDeparted { client: ClientId },
    ClientRejected { client: ClientId, total_rejected: u64 },
    BarberStartedCutting { barber: BarberId },
    BarberFinishedCutting { barber: BarberId },
}

/// Sink for shop events.
///
/// Called from inside the shop's operations, possibly from many tasks at
/// once, so implementations must be cheap and must not block.
pub trait ShopObserver: Send + Sync {
    fn notify(&self, event: ShopEvent);
}

/// Logs every event at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ShopObserver for TracingObserver {
    fn notify(&self, event: ShopEvent) {
        match event {
            ShopEvent::ClientArrived { client } => info!(%client, "Client arrived"),
            ShopEvent::ClientSeated { client } => info!(%client, "Client sat in the barber chair"),
            ShopEvent::ClientServed { client } => info!(%client, "Client served"),
            ShopEvent::ClientDeparted { client } => info!(%client, "Client left, chair is free"),
            ShopEvent::ClientRejected {
                client,
                total_rejected,
            } => info!(%client, total_rejected, "Client turned away, waiting room full"),
            ShopEvent::BarberStartedCutting { barber } => info!(%barber, "Barber started cutting"),
            ShopEvent::BarberFinishedCutting { barber } => info!(%barber, "Barber finished cutting"),
        }
    }
}
