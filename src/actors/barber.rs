use crate::model::BarberId;
use crate::shop::{Shop, ShopError};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

/// A long-lived worker that serves seated clients one after another.
#[derive(Clone)]
pub struct Barber {
    id: BarberId,
    shop: Arc<Shop>,
}

impl Barber {
    pub fn new(id: BarberId, shop: Arc<Shop>) -> Self {
        Self { id, shop }
    }

    /// Serves clients until cancelled and returns how many it picked up.
    ///
    /// `interrupt` stops this barber alone and is expected to be a child of
    /// `shutdown`. Cancellation through `shutdown` is a normal closing time
    /// and yields `Ok`; an interrupt of this barber alone is reported as an
    /// error.
    #[instrument(name = "barber", skip_all, fields(barber = %self.id))]
    pub async fn run(self, shutdown: CancellationToken, interrupt: CancellationToken) -> Result<u64, ShopError> {
        info!("Barber started");
        let mut served = 0u64;
        loop {
            if shutdown.is_cancelled() {
                return Ok(self.close(served).await);
            }
            match self.shop.serve_next(self.id, &interrupt).await {
                Ok(()) => served += 1,
                Err(_) if shutdown.is_cancelled() => return Ok(self.close(served).await),
                Err(e) => {
                    error!(error = %e, served, "Barber interrupted");
                    return Err(e);
                }
            }
        }
    }

    /// Closing time: finish every client still sitting in a chair, then leave.
    async fn close(&self, mut served: u64) -> u64 {
        while self.shop.try_serve_next(self.id).await {
            served += 1;
        }
        info!(served, "Barber going home");
        served
    }
}
