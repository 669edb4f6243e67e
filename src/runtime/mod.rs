//! Runtime orchestration and lifecycle management.
//!
//! This module contains the drivers around the shop:
//!
//! - **Actor lifecycle management**: spawning barbers and clients, interrupting
//!   a barber, closing the shop
//! - **Arrival simulation**: feeding clients in at the configured interval
//! - **Observability setup**: initializing tracing and logging
//!
//! # Main Components
//!
//! - [`ShopSystem`] - Owns the shop and every task that works in it
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod error;
pub mod shop_system;
pub mod tracing;

pub use error::*;
pub use shop_system::*;
pub use self::tracing::*;
