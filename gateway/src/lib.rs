//! # Jelajah Gateway
//!
//! HTTP transport for the Jelajah marketplace client.
//!
//! [`ApiClient`] implements every gateway capability trait from
//! `jelajah-core` against the marketplace's JSON-over-HTTP contract: bearer
//! token on every request (read from a shared [`jelajah_core::TokenStore`]),
//! `{ "data": ... }` response envelopes, and a uniform mapping from HTTP
//! status codes to [`jelajah_core::GatewayError`].
//!
//! The transport enforces the request timeout; nothing above this layer
//! retries or times out on its own.

mod auth;
mod bookings;
mod client;
mod config;
mod destinations;
mod schedules;

pub use client::ApiClient;
pub use config::GatewayConfig;
