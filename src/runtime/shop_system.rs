use crate::actors::{Barber, Client};
use crate::config::ShopConfig;
use crate::model::{BarberId, ClientId, ShopSnapshot, Visit};
use crate::observer::ShopObserver;
use crate::runtime::RuntimeError;
use crate::shop::{Shop, ShopError};
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, error, info, warn};

struct BarberHandle {
    id: BarberId,
    interrupt: CancellationToken,
    handle: JoinHandle<Result<u64, ShopError>>,
}

/// Summary of a finished simulation, produced by [`ShopSystem::shutdown`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Clients that walked in.
    pub arrivals: u32,
    /// Haircuts given by the barbers still working at closing time.
    pub haircuts: u64,
    /// Barbers that were stopped individually before closing time.
    pub interrupted_barbers: Vec<BarberId>,
    pub shop: ShopSnapshot,
}

/// Owns the shop and every task working in it.
///
/// `ShopSystem` is responsible for:
/// - **Lifecycle Management**: spawning barbers at start, clients on arrival,
///   and stopping everyone at the end
/// - **Cancellation**: one root token for closing time, one child token per
///   barber and per client
/// - **Identity**: client ids follow arrival order, barber ids creation order,
///   both starting at 1
///
/// Dropping a `ShopSystem`, or leaving [`shutdown`](ShopSystem::shutdown)
/// early on an error, cancels the root token, so barbers never outlive it.
///
/// # Example
///
/// ```ignore
/// let mut system = ShopSystem::start(ShopConfig::default(), Arc::new(TracingObserver))?;
/// system.run_arrivals().await;
/// let report = system.shutdown().await?;
/// ```
pub struct ShopSystem {
    /// The shared monitor, exposed so callers can read its counters.
    pub shop: Arc<Shop>,
    config: ShopConfig,
    shutdown: CancellationToken,
    barbers: Vec<BarberHandle>,
    clients: Vec<JoinHandle<Result<Visit, ShopError>>>,
    arrivals: u32,
    /// Cancels `shutdown` when the system goes away, whatever the exit path.
    _closing: DropGuard,
}

impl ShopSystem {
    /// Builds the shop and spawns `config.barbers` barbers, each in its own
    /// Tokio task.
    ///
    /// # Returns
    ///
    /// A running system with every barber asleep, waiting for the first client.
    pub fn start(config: ShopConfig, observer: Arc<dyn ShopObserver>) -> Result<Self, RuntimeError> {
        // =====================================================================
        // 1. Build the monitor
        // =====================================================================

        // Validation happens here, before any task exists, so a bad config
        // never leaves half a shop running.
        let shop = Arc::new(Shop::new(&config, observer)?);
        let shutdown = CancellationToken::new();

        // =====================================================================
        // 2. Spawn the barbers
        // =====================================================================

        // Each barber gets a child of the root token: cancelling the child
        // stops that barber alone, cancelling the root stops all of them.
        let barbers = (1..=config.barbers)
            .map(|n| {
                let id = BarberId(n);
                let interrupt = shutdown.child_token();
                let barber = Barber::new(id, shop.clone());
                let handle = tokio::spawn(barber.run(shutdown.clone(), interrupt.clone()));
                BarberHandle { id, interrupt, handle }
            })
            .collect();

        info!(
            capacity = config.capacity,
            chairs = config.chairs,
            barbers = config.barbers,
            "Shop open"
        );

        Ok(Self {
            shop,
            config,
            _closing: shutdown.clone().drop_guard(),
            shutdown,
            barbers,
            clients: Vec::new(),
            arrivals: 0,
        })
    }

    /// Lets the next client in. Returns its id, which is its 1-based
    /// position in the arrival order.
    pub fn spawn_client(&mut self) -> ClientId {
        self.arrivals += 1;
        let id = ClientId(self.arrivals);
        let client = Client::new(id, self.shop.clone());
        self.clients.push(tokio::spawn(client.visit(self.shutdown.child_token())));
        debug!(%id, "Client spawned");
        id
    }

    /// Feeds `config.clients` arrivals into the shop, `config.arrival_interval`
    /// apart. Returns once the last client has walked in, not once it is served.
    pub async fn run_arrivals(&mut self) {
        for n in 0..self.config.clients {
            if n > 0 {
                tokio::time::sleep(self.config.arrival_interval).await;
            }
            self.spawn_client();
        }
    }

    /// Stops a single barber. Other barbers and any seated client carry on.
    pub fn interrupt_barber(&self, id: BarberId) -> Result<(), RuntimeError> {
        let barber = self
            .barbers
            .iter()
            .find(|b| b.id == id)
            .ok_or(RuntimeError::UnknownBarber(id))?;
        info!(barber = %id, "Interrupting barber");
        barber.interrupt.cancel();
        Ok(())
    }

    /// Closes the shop.
    ///
    /// This method:
    /// 1. Waits for every client that already arrived to finish
    /// 2. Cancels the root token, sending the barbers home
    /// 3. Waits for the barbers, who first serve anyone still seated
    ///
    /// # Returns
    ///
    /// - `Ok(SimulationReport)` once every task has ended
    /// - `Err(RuntimeError::TaskFailed)` if any task panicked. The root token
    ///   is cancelled on this path too.
    pub async fn shutdown(self) -> Result<SimulationReport, RuntimeError> {
        info!(arrivals = self.arrivals, "Closing: waiting for clients to leave");

        // =====================================================================
        // Step 1: Let the clients finish
        // =====================================================================

        // Barbers keep working meanwhile: an admitted client may still be
        // waiting for the chair and must not find the shop closed.
        for handle in self.clients {
            match handle.await {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => warn!(error = %e, "Client left without a haircut"),
                Err(e) => {
                    // Returning drops `_closing`, which cancels the barbers.
                    error!("Client task failed: {:?}", e);
                    return Err(RuntimeError::TaskFailed(e.to_string()));
                }
            }
        }

        // =====================================================================
        // Step 2: Send the barbers home
        // =====================================================================

        self.shutdown.cancel();

        let mut haircuts = 0;
        let mut interrupted_barbers = Vec::new();
        for barber in self.barbers {
            match barber.handle.await {
                Ok(Ok(served)) => haircuts += served,
                // Stopped earlier through `interrupt_barber`; already logged.
                Ok(Err(_)) => interrupted_barbers.push(barber.id),
                Err(e) => {
                    error!("Barber task failed: {:?}", e);
                    return Err(RuntimeError::TaskFailed(e.to_string()));
                }
            }
        }

        let report = SimulationReport {
            arrivals: self.arrivals,
            haircuts,
            interrupted_barbers,
            shop: self.shop.snapshot().await,
        };
        info!(
            served = report.shop.served,
            rejected = report.shop.rejected,
            haircuts = report.haircuts,
            "Shop closed"
        );
        Ok(report)
    }
}
