//! # Recording Observer
//!
//! An in-memory [`ShopObserver`] for tests. Every event is stored with the
//! Tokio clock reading at the moment it was emitted, so tests running with a
//! paused clock get exact, reproducible timestamps.
//!
//! ```ignore
//! let recorder = Arc::new(RecordingObserver::new());
//! let shop = Shop::new(&config, recorder.clone());
//! // ... drive clients and barbers ...
//! assert_eq!(recorder.served_order(), vec![ClientId(1), ClientId(2)]);
//! ```

use super::{ShopEvent, ShopObserver};
use crate::model::ClientId;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::time::Instant;

/// Interval during which a client occupied a chair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatWindow {
    pub client: ClientId,
    pub seated_at: Instant,
    pub departed_at: Instant,
}

impl SeatWindow {
    pub fn overlaps(&self, other: &SeatWindow) -> bool {
        self.seated_at < other.departed_at && other.seated_at < self.departed_at
    }
}

#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<(Instant, ShopEvent)>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events in emission order.
    pub fn events(&self) -> Vec<ShopEvent> {
        self.timed_events().into_iter().map(|(_, e)| e).collect()
    }

    pub fn timed_events(&self) -> Vec<(Instant, ShopEvent)> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn count(&self, pred: impl Fn(&ShopEvent) -> bool) -> usize {
        self.events().iter().filter(|e| pred(e)).count()
    }

    /// Clients in the order they finished their haircut.
    pub fn served_order(&self) -> Vec<ClientId> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ShopEvent::ClientServed { client } => Some(client),
                _ => None,
            })
            .collect()
    }

    pub fn rejected_clients(&self) -> Vec<ClientId> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ShopEvent::ClientRejected { client, .. } => Some(client),
                _ => None,
            })
            .collect()
    }

    /// Seat occupancy intervals of every client that both sat down and left.
    pub fn seat_windows(&self) -> Vec<SeatWindow> {
        let mut seated: HashMap<ClientId, Instant> = HashMap::new();
        let mut windows = Vec::new();
        for (at, event) in self.timed_events() {
            match event {
                ShopEvent::ClientSeated { client } => {
                    seated.insert(client, at);
                }
                ShopEvent::ClientDeparted { client } => {
                    if let Some(seated_at) = seated.remove(&client) {
                        windows.push(SeatWindow {
                            client,
                            seated_at,
                            departed_at: at,
                        });
                    }
                }
                _ => {}
            }
        }
        windows
    }
}

impl ShopObserver for RecordingObserver {
    fn notify(&self, event: ShopEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((Instant::now(), event));
    }
}
