//! # Jelajah Testing
//!
//! Testing utilities for the Jelajah marketplace client.
//!
//! This crate provides:
//! - [`MockGateway`]: an in-memory, scriptable implementation of every
//!   gateway capability trait, with per-operation call counters and one-shot
//!   failure injection
//! - [`FixedClock`] / [`test_clock`]: deterministic time
//! - [`fixtures`]: ready-made domain entities for test setups
//!
//! ## Example
//!
//! ```ignore
//! use jelajah_testing::{MockGateway, fixtures};
//!
//! #[tokio::test]
//! async fn confirm_counts_one_patch_call() {
//!     let gateway = Arc::new(MockGateway::new());
//!     gateway.seed_booking(fixtures::pending_booking("b1", "d1", "t1"));
//!
//!     let mut manager = BookingManager::new(gateway.clone(), gateway.clone());
//!     manager.transition(&BookingId::new("b1"), BookingStatus::Confirmed, Role::Guide).await?;
//!
//!     assert_eq!(gateway.counts().update_status, 1);
//! }
//! ```

pub mod fixtures;
pub mod mocks;

pub use mocks::{CallCounts, FixedClock, MockGateway, test_clock};
