//! # Sleeping Barber
//!
//! > **The sleeping barber problem, as a Tokio monitor.**
//!
//! A shop has a bounded waiting room, a barber chair and one or more barbers.
//! Clients walk in at intervals. If the waiting room has room they are
//! admitted, wait for the chair and get a haircut; otherwise they are turned
//! away and counted.
//!
//! ## 🏗️ Design
//!
//! All synchronization lives in one place, the [`Shop`](shop::Shop) monitor:
//!
//! - a **state lock** linearizes admission decisions, so the waiting room can
//!   never hold more than its capacity even when clients race;
//! - a **seat** semaphore keeps at most one client per chair;
//! - a **readiness** semaphore lets a seated client wake a sleeping barber.
//!
//! Clients and barbers are Tokio tasks. Each one gets a
//! `CancellationToken`, and every blocking wait inside the shop races against
//! it, so a barber can be stopped cleanly instead of looping forever.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Monitor ([`shop`])
//! - **Key items**: [`Shop`](shop::Shop), [`ShopError`](shop::ShopError).
//!
//! ### 2. The Actors ([`actors`])
//! - **Role**: Thin wrappers that carry an id and call into the shop.
//! - **Key items**: [`Client`](actors::Client), [`Barber`](actors::Barber).
//!
//! ### 3. The Orchestrator ([`runtime`])
//! - **Role**: Spawns barbers, feeds in arrivals, closes the shop.
//! - **Key items**: [`ShopSystem`](runtime::ShopSystem), [`setup_tracing`](runtime::setup_tracing).
//!
//! ### 4. Observability ([`observer`])
//! - **Role**: Receives arrival, seating, rejection and cutting events.
//! - **Key items**: [`TracingObserver`](observer::TracingObserver),
//!   [`RecordingObserver`](observer::RecordingObserver) for tests.
//!
//! ### 5. Configuration ([`config`], [`cli`])
//! - **Key items**: [`ShopConfig`](config::ShopConfig), [`HaircutTiming`](config::HaircutTiming).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # The reference run: capacity 2, one barber, five clients every 500ms
//! cargo run
//!
//! # Admission decisions and counter changes
//! RUST_LOG=debug cargo run -- --clients 10 --arrival-ms 100
//! ```

pub mod actors;
pub mod cli;
pub mod config;
pub mod model;
pub mod observer;
pub mod runtime;
pub mod shop;
