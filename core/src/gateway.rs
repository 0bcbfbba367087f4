//! Capability traits for the remote gateway.
//!
//! The managers depend on these abstractions, not on a concrete transport.
//! `jelajah-gateway` implements them over HTTP; `jelajah-testing` provides a
//! scripted in-memory mock.

use crate::error::GatewayError;
use crate::status::BookingStatus;
use crate::types::{
    Booking, BookingId, Destination, DestinationId, Role, Rupiah, ScheduleId, TourSchedule, User,
    UserId,
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Result alias for gateway calls
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Scope selector for booking list fetches.
///
/// The gateway scopes lists by the bearer token; the identifier carried here
/// is what the caller believes the token belongs to, and is what mock
/// gateways filter on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BookingFilter {
    /// Bookings owned by a traveler
    ForTraveler(UserId),
    /// Bookings assigned to a guide
    ForGuide(UserId),
}

/// Persistence and retrieval of booking records
#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// Requests a new booking for a destination.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on transport or application failure.
    async fn create_booking(&self, destination_id: &DestinationId) -> GatewayResult<Booking>;

    /// Fetches a single booking by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the gateway reports no such
    /// booking, or any other [`GatewayError`] on failure.
    async fn fetch_booking(&self, id: &BookingId) -> GatewayResult<Booking>;

    /// Fetches all bookings in the given scope.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on transport or application failure.
    async fn list_bookings(&self, filter: &BookingFilter) -> GatewayResult<Vec<Booking>>;

    /// Persists a status change and returns the booking as the gateway now
    /// sees it. The returned status is authoritative and may differ from the
    /// requested one if the gateway applied server-side effects.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on transport or application failure.
    async fn update_status(
        &self,
        id: &BookingId,
        status: BookingStatus,
    ) -> GatewayResult<Booking>;
}

/// Optional filters for destination catalog fetches
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DestinationQuery {
    /// Only destinations run by this operator
    pub manager_id: Option<UserId>,
    /// Only destinations in this category
    pub category: Option<String>,
    /// Name substring search
    pub name: Option<String>,
}

/// Payload for creating a destination
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDestination {
    /// Destination name
    pub name: String,
    /// Long-form description
    pub description: String,
    /// Location (city, landmark)
    pub location: String,
    /// Region the destination belongs to
    pub region: String,
    /// Quoted price per visit
    pub price: Rupiah,
    /// Image URL
    pub image: String,
}

/// Read and write access to the destination catalog
#[async_trait]
pub trait DestinationGateway: Send + Sync {
    /// Fetches destinations matching the query.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on transport or application failure.
    async fn list_destinations(&self, query: &DestinationQuery) -> GatewayResult<Vec<Destination>>;

    /// Fetches a single destination by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the destination does not
    /// exist, or any other [`GatewayError`] on failure.
    async fn fetch_destination(&self, id: &DestinationId) -> GatewayResult<Destination>;

    /// Creates a destination and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on transport or application failure.
    async fn create_destination(&self, destination: &NewDestination) -> GatewayResult<Destination>;
}

/// Payload for publishing a tour schedule
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSchedule {
    /// Destination the tour visits
    pub destination_id: DestinationId,
    /// Tour date
    pub date: NaiveDate,
    /// Departure time
    pub time: NaiveTime,
    /// Tour duration in hours
    pub duration_hours: u8,
    /// Maximum group size
    pub max_capacity: u32,
    /// Price per traveler
    pub price: Rupiah,
    /// Optional tour description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update to a tour schedule; `None` fields are left unchanged
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleUpdate {
    /// New tour date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// New departure time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    /// New tour duration in hours
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<u8>,
    /// New maximum group size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<u32>,
    /// New price per traveler
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Rupiah>,
    /// Open or close the slot for booking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    /// New tour description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Management of a guide's published tour slots
#[async_trait]
pub trait ScheduleGateway: Send + Sync {
    /// Fetches the authenticated guide's schedules.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on transport or application failure.
    async fn list_schedules(&self) -> GatewayResult<Vec<TourSchedule>>;

    /// Publishes a new schedule and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on transport or application failure.
    async fn create_schedule(&self, schedule: &NewSchedule) -> GatewayResult<TourSchedule>;

    /// Applies a partial update and returns the updated schedule.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the schedule does not exist,
    /// or any other [`GatewayError`] on failure.
    async fn update_schedule(
        &self,
        id: &ScheduleId,
        update: &ScheduleUpdate,
    ) -> GatewayResult<TourSchedule>;

    /// Removes a schedule.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the schedule does not exist,
    /// or any other [`GatewayError`] on failure.
    async fn delete_schedule(&self, id: &ScheduleId) -> GatewayResult<()>;
}

/// Registration payload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Plain-text password, sent over TLS only
    pub password: String,
    /// Requested marketplace role
    pub role: Role,
}

/// Result of a successful login: the bearer token plus the authenticated
/// user record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// Bearer token to attach to subsequent requests
    pub token: String,
    /// Authenticated user
    pub user: User,
}

/// Authentication against the gateway
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a bearer token and user record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unauthorized`] for bad credentials, or any
    /// other [`GatewayError`] on failure.
    async fn login(&self, email: &str, password: &str) -> GatewayResult<AuthSession>;

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on transport or application failure.
    async fn register(&self, user: &NewUser) -> GatewayResult<User>;

    /// Fetches every registered user. The gateway restricts this route to
    /// admin bearer tokens.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unauthorized`] when the token is not an
    /// admin's, or any other [`GatewayError`] on failure.
    async fn list_users(&self) -> GatewayResult<Vec<User>>;
}
