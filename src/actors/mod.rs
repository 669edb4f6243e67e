//! The two kinds of actors that visit the shop.
//!
//! Both are thin wrappers: they carry an identity and a shared [`Shop`](crate::shop::Shop)
//! reference, call into the shop, and report how their run ended.

pub mod barber;
pub mod client;

pub use barber::*;
pub use client::*;
