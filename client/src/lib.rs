//! # Jelajah Client
//!
//! Stateful managers over the Jelajah gateway capabilities.
//!
//! Each manager owns a cache of the records relevant to the current user
//! and is injected with the gateway traits it needs - no ambient globals.
//! All cache mutation goes through `&mut self` after a resolved gateway
//! call (confirmed-write-then-cache), which makes the single-writer
//! discipline a compile-time property rather than a convention.
//!
//! - [`BookingManager`]: the booking lifecycle core - creation, scoped
//!   lists, detail with destination snapshot, and role-gated status
//!   transitions validated locally before any network call.
//! - [`DestinationCatalog`]: the destination catalog (browse, detail,
//!   manager-gated create).
//! - [`ScheduleManager`]: a guide's published tour slots.
//! - [`Session`]: login/logout and the shared bearer token.

pub mod booking;
pub mod catalog;
pub mod schedule;
pub mod session;

pub use booking::BookingManager;
pub use catalog::{CatalogError, DestinationCatalog};
pub use schedule::{ScheduleError, ScheduleManager};
pub use session::{Session, SessionError};
