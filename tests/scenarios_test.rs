use sleeping_barber::config::{HaircutTiming, ShopConfig};
use sleeping_barber::model::{BarberId, ClientId};
use sleeping_barber::observer::{RecordingObserver, ShopEvent, ShopObserver};
use sleeping_barber::runtime::{RuntimeError, ShopSystem};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Records everything, but blows up when the first client walks in.
#[derive(Default)]
struct FailOnFirstArrival {
    recorder: RecordingObserver,
}

impl ShopObserver for FailOnFirstArrival {
    fn notify(&self, event: ShopEvent) {
        if event == (ShopEvent::ClientArrived { client: ClientId(1) }) {
            panic!("observer failure for client_1");
        }
        self.recorder.notify(event);
    }
}

fn cuts(recorder: &RecordingObserver) -> usize {
    recorder.count(|e| matches!(e, ShopEvent::BarberStartedCutting { .. }))
}

fn config(capacity: usize, barbers: u32, clients: u32, arrival_ms: u64) -> ShopConfig {
    ShopConfig {
        capacity,
        chairs: 1,
        barbers,
        clients,
        arrival_interval: Duration::from_millis(arrival_ms),
        timing: HaircutTiming::symmetric(Duration::from_millis(1000)),
    }
}

/// Arrivals spaced wider than a haircut: nobody is ever turned away and
/// clients are served in the order they came in.
#[tokio::test(start_paused = true)]
async fn spaced_arrivals_are_all_served_in_order() {
    let recorder = Arc::new(RecordingObserver::new());
    let mut system = ShopSystem::start(config(2, 1, 5, 1500), recorder.clone()).unwrap();

    system.run_arrivals().await;
    let report = system.shutdown().await.unwrap();

    assert_eq!(report.arrivals, 5);
    assert_eq!(report.shop.rejected, 0);
    assert_eq!(report.shop.served, 5);
    assert_eq!(report.shop.waiting, 0, "every seated client was picked up");
    assert_eq!(report.haircuts, 5);
    assert_eq!(
        recorder.served_order(),
        (1..=5).map(ClientId).collect::<Vec<_>>()
    );
}

/// Five clients at once against a waiting room of two.
#[tokio::test(start_paused = true)]
async fn simultaneous_arrivals_overflow_the_waiting_room() {
    let recorder = Arc::new(RecordingObserver::new());
    let mut system = ShopSystem::start(config(2, 1, 5, 0), recorder.clone()).unwrap();

    for _ in 0..5 {
        system.spawn_client();
    }
    let report = system.shutdown().await.unwrap();

    assert!(report.shop.rejected <= 3, "rejected {}", report.shop.rejected);
    assert!(report.shop.served >= 2);
    assert_eq!(report.shop.rejected + report.shop.served, 5);
    assert_eq!(
        recorder.rejected_clients().len() as u64,
        report.shop.rejected
    );
}

/// The same burst driven through the arrival loop with a zero interval.
#[tokio::test(start_paused = true)]
async fn zero_interval_arrival_loop_accounts_for_everyone() {
    let mut system = ShopSystem::start(config(2, 1, 5, 0), Arc::new(RecordingObserver::new())).unwrap();

    system.run_arrivals().await;
    let report = system.shutdown().await.unwrap();

    assert!(report.shop.rejected <= 3);
    assert_eq!(report.shop.rejected + report.shop.served, 5);
}

#[tokio::test(start_paused = true)]
async fn zero_capacity_rejects_everyone() {
    let recorder = Arc::new(RecordingObserver::new());
    let mut system = ShopSystem::start(config(0, 1, 4, 100), recorder.clone()).unwrap();

    system.run_arrivals().await;
    let report = system.shutdown().await.unwrap();

    assert_eq!(report.shop.rejected, 4);
    assert_eq!(report.shop.served, 0);
    assert_eq!(report.haircuts, 0);

    let totals: Vec<u64> = recorder
        .events()
        .into_iter()
        .filter_map(|e| match e {
            ShopEvent::ClientRejected { total_rejected, .. } => Some(total_rejected),
            _ => None,
        })
        .collect();
    assert_eq!(totals, vec![1, 2, 3, 4], "running total grows by one per rejection");
}

/// Capacity C with C + k simultaneous arrivals and nobody draining the queue:
/// exactly C get in.
#[tokio::test(start_paused = true)]
async fn admission_is_exact_without_barbers() {
    let mut system = ShopSystem::start(config(3, 0, 0, 0), Arc::new(RecordingObserver::new())).unwrap();

    for _ in 0..7 {
        system.spawn_client();
    }
    let report = system.shutdown().await.unwrap();

    assert_eq!(report.shop.served, 3);
    assert_eq!(report.shop.rejected, 4);
    assert_eq!(report.shop.waiting, 3, "no barber ever picked anyone up");
}

/// Stopping an idle barber leaves the seated client and the other barber alone.
#[tokio::test(start_paused = true)]
async fn interrupting_an_idle_barber_stops_only_that_barber() {
    let recorder = Arc::new(RecordingObserver::new());
    let mut system = ShopSystem::start(config(2, 2, 0, 0), recorder.clone()).unwrap();

    system.spawn_client();
    tokio::time::sleep(Duration::from_millis(10)).await;

    let busy = recorder
        .events()
        .into_iter()
        .find_map(|e| match e {
            ShopEvent::BarberStartedCutting { barber } => Some(barber),
            _ => None,
        })
        .expect("one barber picked up the first client");
    let idle = if busy == BarberId(1) { BarberId(2) } else { BarberId(1) };

    system.interrupt_barber(idle).unwrap();

    // Wait for the first haircut to finish, then send another client in.
    tokio::time::sleep(Duration::from_millis(1500)).await;
    system.spawn_client();

    let report = system.shutdown().await.unwrap();

    assert_eq!(report.interrupted_barbers, vec![idle]);
    assert_eq!(report.shop.served, 2);
    assert_eq!(report.shop.rejected, 0);
    assert_eq!(report.shop.waiting, 0);
    assert_eq!(report.haircuts, 2, "the remaining barber served both clients");
    assert_eq!(
        recorder.count(|e| matches!(e, ShopEvent::BarberStartedCutting { barber } if *barber == idle)),
        0
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["interrupted_barbers"], serde_json::json!([idle.0]));
    assert_eq!(json["shop"]["served"], 2);
}

/// A failing client task aborts the shutdown, and the barbers still go home.
#[tokio::test(start_paused = true)]
async fn failed_shutdown_still_stops_the_barbers() {
    let observer = Arc::new(FailOnFirstArrival::default());
    let mut system = ShopSystem::start(config(2, 1, 0, 0), observer.clone()).unwrap();
    let shop = system.shop.clone();

    system.spawn_client();
    let result = system.shutdown().await;
    assert!(matches!(result, Err(RuntimeError::TaskFailed(_))));

    // Give the barber a chance to notice closing time before anyone sits down.
    tokio::time::sleep(Duration::from_millis(10)).await;

    let visit = shop
        .request_haircut(ClientId(2), &CancellationToken::new())
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(2000)).await;

    assert!(visit.is_served());
    assert_eq!(cuts(&observer.recorder), 0, "no barber works after shutdown returned");
    assert_eq!(shop.waiting_count().await, 1);
}

/// Dropping the system without a shutdown sends the barbers home as well.
#[tokio::test(start_paused = true)]
async fn dropping_the_system_stops_the_barbers() {
    let recorder = Arc::new(RecordingObserver::new());
    let system = ShopSystem::start(config(2, 2, 0, 0), recorder.clone()).unwrap();
    let shop = system.shop.clone();

    drop(system);
    tokio::time::sleep(Duration::from_millis(10)).await;

    shop.request_haircut(ClientId(1), &CancellationToken::new())
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(2000)).await;

    assert_eq!(cuts(&recorder), 0);
}

#[tokio::test(start_paused = true)]
async fn interrupting_an_unknown_barber_fails() {
    let system = ShopSystem::start(config(2, 1, 0, 0), Arc::new(RecordingObserver::new())).unwrap();

    let result = system.interrupt_barber(BarberId(7));

    assert!(matches!(result, Err(RuntimeError::UnknownBarber(BarberId(7)))));
    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn shutdown_with_idle_barbers_is_clean() {
    let system = ShopSystem::start(config(2, 3, 0, 0), Arc::new(RecordingObserver::new())).unwrap();

    let report = system.shutdown().await.unwrap();

    assert_eq!(report.arrivals, 0);
    assert!(report.interrupted_barbers.is_empty());
    assert_eq!(report.haircuts, 0);
}

#[tokio::test]
async fn invalid_config_is_refused() {
    let config = ShopConfig {
        chairs: 0,
        ..ShopConfig::default()
    };

    let result = ShopSystem::start(config, Arc::new(RecordingObserver::new()));

    assert!(matches!(result, Err(RuntimeError::Config(_))));
}
