//! # Jelajah Core
//!
//! Domain types and rules for the Jelajah tourism marketplace client.
//!
//! This crate is the functional core of the client: owned domain entities,
//! the booking lifecycle state machine, the role policy that gates its
//! transitions, the error taxonomy, and the capability traits the remote
//! gateway is consumed through. Nothing in this crate performs I/O; the
//! HTTP transport lives in `jelajah-gateway` and the stateful managers in
//! `jelajah-client`.
//!
//! ## Core Concepts
//!
//! - **Booking**: a traveler's reservation for a destination, with a
//!   lifecycle status (`pending`, `confirmed`, `completed`, `cancelled`).
//! - **Role policy**: a pure function over `(role, from, to)` deciding
//!   whether an actor may trigger a status edge.
//! - **Gateway traits**: abstract capabilities (`BookingGateway` and
//!   friends) the managers are injected with, so every piece of logic is
//!   testable against a mock.

pub mod environment;
pub mod error;
pub mod gateway;
pub mod policy;
pub mod status;
pub mod token;
pub mod types;

pub use error::{BookingError, GatewayError};
pub use policy::{TransitionDenied, authorize_transition};
pub use status::BookingStatus;
pub use token::TokenStore;
pub use types::{
    Actor, Booking, BookingId, Destination, DestinationId, DestinationSnapshot, Role, Rupiah,
    ScheduleId, TourSchedule, User, UserId,
};
