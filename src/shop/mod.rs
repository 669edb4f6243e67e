//! # The Shop Monitor
//!
//! [`Shop`] owns every piece of shared state in the simulation and is the
//! only place where clients and barbers synchronize.
//!
//! ## Primitives
//!
//! - **State lock** (`tokio::sync::Mutex<ShopState>`): guards the waiting,
//!   rejected and served counters. Admission decisions are linearized by it.
//! - **Seat** (`Semaphore` with one permit per chair): a client holds a permit
//!   for the whole time it sits in the chair.
//! - **Readiness** (`Semaphore` starting at zero): a client adds a permit once
//!   seated, a barber consumes one permit per client it picks up.
//!
//! ## Hand-off
//!
//! The hand-off is relaxed. Once a barber has picked up a seated client, the
//! barber's service time and the client's seat hold run side by side and are
//! not joined back together. With a single chair this still keeps at most one
//! client in the chair at any time.
//!
//! ## Cancellation
//!
//! Every blocking wait races against the caller's `CancellationToken`. A
//! cancelled wait returns [`ShopError::InterruptedWait`]. Nothing is held at a
//! wait point, so a cancelled caller never leaves a lock behind.

pub mod error;

pub use error::*;

use crate::config::{ConfigError, HaircutTiming, ShopConfig};
use crate::model::{BarberId, ClientId, ShopSnapshot, Visit};
use crate::observer::{ShopEvent, ShopObserver};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

#[derive(Debug, Default)]
struct ShopState {
    waiting: usize,
    rejected: u64,
    served: u64,
}

pub struct Shop {
    capacity: usize,
    chairs: usize,
    timing: HaircutTiming,
    state: Mutex<ShopState>,
    seat: Semaphore,
    ready: Semaphore,
    observer: Arc<dyn ShopObserver>,
}

/// Runs `fut` unless `cancel` fires first. A token that is already cancelled
/// wins even if `fut` would complete immediately.
async fn interruptible<F: Future>(
    cancel: &CancellationToken,
    point: WaitPoint,
    fut: F,
) -> Result<F::Output, ShopError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ShopError::InterruptedWait { point }),
        output = fut => Ok(output),
    }
}

impl Shop {
    pub fn new(config: &ShopConfig, observer: Arc<dyn ShopObserver>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            capacity: config.capacity,
            chairs: config.chairs,
            timing: config.timing,
            state: Mutex::new(ShopState::default()),
            seat: Semaphore::new(config.chairs),
            ready: Semaphore::new(0),
            observer,
        })
    }

    /// A client asks for a haircut.
    ///
    /// If the waiting room has room, the client is admitted, waits for a
    /// chair, announces itself to the barbers and sits for the seat-hold
    /// duration. Otherwise it is turned away and the rejection total grows by
    /// one.
    ///
    /// # Errors
    ///
    /// [`ShopError::InterruptedWait`] if `cancel` fires while waiting on the
    /// state lock or for a chair. An admitted client that gives up on the
    /// chair hands its waiting slot back first.
    #[instrument(skip_all, fields(client = %client))]
    pub async fn request_haircut(
        &self,
        client: ClientId,
        cancel: &CancellationToken,
    ) -> Result<Visit, ShopError> {
        self.observer.notify(ShopEvent::ClientArrived { client });

        let mut state = interruptible(cancel, WaitPoint::StateLock, self.state.lock()).await?;
        if state.waiting >= self.capacity {
            state.rejected += 1;
            let total_rejected = state.rejected;
            drop(state);

            debug!(total_rejected, "Waiting room full");
            self.observer.notify(ShopEvent::ClientRejected {
                client,
                total_rejected,
            });
            return Ok(Visit::Rejected { total_rejected });
        }
        state.waiting += 1;
        debug!(waiting = state.waiting, capacity = self.capacity, "Admitted");
        drop(state);

        let acquired = interruptible(cancel, WaitPoint::Seat, self.seat.acquire())
            .await
            .and_then(|permit| {
                permit.map_err(|_| ShopError::InterruptedWait {
                    point: WaitPoint::Seat,
                })
            });
        let seat = match acquired {
            Ok(seat) => seat,
            Err(e) => {
                self.abandon_slot().await;
                warn!(error = %e, "Gave up waiting for a chair");
                return Err(e);
            }
        };

        self.observer.notify(ShopEvent::ClientSeated { client });
        self.ready.add_permits(1);

        tokio::time::sleep(self.timing.seat_hold).await;

        self.observer.notify(ShopEvent::ClientServed { client });
        self.state.lock().await.served += 1;
        self.observer.notify(ShopEvent::ClientDeparted { client });
        drop(seat);

        Ok(Visit::Served)
    }

    /// Returns the waiting slot of an admitted client that never sat down.
    /// No barber can have picked that client up, since it never signalled.
    async fn abandon_slot(&self) {
        let mut state = self.state.lock().await;
        state.waiting -= 1;
        debug!(waiting = state.waiting, "Waiting slot released");
    }

    /// A barber waits for the next seated client and serves them.
    ///
    /// Once a readiness permit is consumed the barber is committed: the
    /// counter update and the service time are not cancellable.
    ///
    /// # Errors
    ///
    /// [`ShopError::InterruptedWait`] if `cancel` fires while the barber is
    /// waiting for a client.
    #[instrument(skip_all, fields(barber = %barber))]
    pub async fn serve_next(&self, barber: BarberId, cancel: &CancellationToken) -> Result<(), ShopError> {
        debug!("Waiting for a seated client");
        let permit = interruptible(cancel, WaitPoint::Readiness, self.ready.acquire())
            .await?
            .map_err(|_| ShopError::InterruptedWait {
                point: WaitPoint::Readiness,
            })?;
        permit.forget();
        self.cut(barber).await;
        Ok(())
    }

    /// Serves a client only if one is already seated and unclaimed. Never
    /// blocks on the readiness signal; used by barbers at closing time.
    #[instrument(skip_all, fields(barber = %barber))]
    pub async fn try_serve_next(&self, barber: BarberId) -> bool {
        match self.ready.try_acquire() {
            Ok(permit) => {
                permit.forget();
                self.cut(barber).await;
                true
            }
            Err(_) => false,
        }
    }

    async fn cut(&self, barber: BarberId) {
        {
            let mut state = self.state.lock().await;
            state.waiting -= 1;
            debug!(waiting = state.waiting, "Picked up a client");
        }

        self.observer.notify(ShopEvent::BarberStartedCutting { barber });
        tokio::time::sleep(self.timing.service).await;
        self.observer.notify(ShopEvent::BarberFinishedCutting { barber });
    }

    pub async fn rejected_count(&self) -> u64 {
        self.state.lock().await.rejected
    }

    pub async fn waiting_count(&self) -> usize {
        self.state.lock().await.waiting
    }

    pub async fn served_count(&self) -> u64 {
        self.state.lock().await.served
    }

    /// All counters read under a single acquisition of the state lock.
    pub async fn snapshot(&self) -> ShopSnapshot {
        let state = self.state.lock().await;
        ShopSnapshot {
            capacity: self.capacity,
            chairs: self.chairs,
            waiting: state.waiting,
            rejected: state.rejected,
            served: state.served,
        }
    }
}
