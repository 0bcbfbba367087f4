//! Domain types for the Jelajah marketplace client.
//!
//! All identifiers are newtypes over the opaque strings the gateway assigns;
//! the client never mints booking or destination ids itself. Entities are
//! owned data, `Clone`-able, and serialize with the camelCase names the wire
//! contract uses.

use crate::status::BookingStatus;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a booking, assigned by the gateway on creation
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(String);

impl BookingId {
    /// Creates a `BookingId` from a gateway-assigned string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a destination
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DestinationId(String);

impl DestinationId {
    /// Creates a `DestinationId` from a gateway-assigned string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a user (traveler, guide, manager, or admin)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a `UserId` from a gateway-assigned string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a tour schedule
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleId(String);

impl ScheduleId {
    /// Creates a `ScheduleId` from a gateway-assigned string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Money Value Object (whole rupiah, no fractional subdivision on the wire)
// ============================================================================

/// Represents a price in whole rupiah.
///
/// The marketplace quotes prices as integral currency amounts; there is no
/// fractional subdivision, so a plain unsigned amount is exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rupiah(u64);

impl Rupiah {
    /// Creates a `Rupiah` value from a whole-unit amount
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Returns the amount in whole rupiah
    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.0
    }

    /// Checks if the amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Rupiah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rp{}", self.0)
    }
}

// ============================================================================
// Roles
// ============================================================================

/// Closed set of marketplace roles.
///
/// The wire contract uses the Indonesian vocabulary (`wisatawan`, `pemandu`,
/// `pengelola`, `admin`); the Rust names are the English equivalents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// End user who books destinations (`wisatawan`)
    #[serde(rename = "wisatawan")]
    Traveler,
    /// Local tour guide who accepts or rejects bookings (`pemandu`)
    #[serde(rename = "pemandu")]
    Guide,
    /// Destination operator who manages the catalog and guide roster
    /// (`pengelola`)
    #[serde(rename = "pengelola")]
    Manager,
    /// Platform moderator
    #[serde(rename = "admin")]
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Traveler => "traveler",
            Self::Guide => "guide",
            Self::Manager => "manager",
            Self::Admin => "admin",
        };
        write!(f, "{name}")
    }
}

/// Claimed identity a view controller passes into role-gated operations.
///
/// The session collaborator authenticates the user; the managers only
/// authorize transitions given the claimed role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    /// Identifier of the acting user
    pub user_id: UserId,
    /// Claimed role of the acting user
    pub role: Role,
}

impl Actor {
    /// Creates an actor with an explicit role
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Creates a traveler actor
    #[must_use]
    pub fn traveler(user_id: impl Into<String>) -> Self {
        Self::new(UserId::new(user_id), Role::Traveler)
    }

    /// Creates a guide actor
    #[must_use]
    pub fn guide(user_id: impl Into<String>) -> Self {
        Self::new(UserId::new(user_id), Role::Guide)
    }
}

// ============================================================================
// Booking
// ============================================================================

/// Denormalized destination view attached to a booking for display.
///
/// Fetched separately from the destination catalog; not authoritative and
/// may be stale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationSnapshot {
    /// Destination name
    pub name: String,
    /// Destination image URL
    pub image: String,
    /// Destination location
    pub location: String,
}

/// A traveler's reservation for a destination visit.
///
/// Status moves only along the edges of the booking state machine; `id` is
/// immutable once assigned; `total_price` is fixed at creation time and
/// never recomputed client-side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Gateway-assigned identifier
    pub id: BookingId,
    /// Destination being booked
    pub destination_id: DestinationId,
    /// User who created the booking
    pub traveler_id: UserId,
    /// Assigned guide, if the destination has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide_id: Option<UserId>,
    /// Price fixed at creation time
    pub total_price: Rupiah,
    /// Current lifecycle status
    pub status: BookingStatus,
    /// Creation timestamp, assigned by the gateway
    pub created_at: DateTime<Utc>,
    /// Client-side denormalized destination view; never sent on the wire
    #[serde(skip)]
    pub destination: Option<DestinationSnapshot>,
}

// ============================================================================
// Destinations
// ============================================================================

/// A bookable destination in the marketplace catalog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    /// Gateway-assigned identifier
    pub id: DestinationId,
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
    /// Aggregate traveler rating
    pub rating: f32,
    /// Image URL
    pub image: String,
    /// Operator managing this destination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<UserId>,
}

impl Destination {
    /// Returns the display snapshot travelers see on their bookings
    #[must_use]
    pub fn snapshot(&self) -> DestinationSnapshot {
        DestinationSnapshot {
            name: self.name.clone(),
            image: self.image.clone(),
            location: self.location.clone(),
        }
    }
}

// ============================================================================
// Tour schedules
// ============================================================================

/// A guide's published tour slot for a destination
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourSchedule {
    /// Gateway-assigned identifier
    pub id: ScheduleId,
    /// Destination the tour visits
    pub destination_id: DestinationId,
    /// Destination name, denormalized for display
    pub destination_name: String,
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
    /// Whether the slot is open for booking
    pub is_available: bool,
    /// Optional tour description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ============================================================================
// Users
// ============================================================================

/// A registered marketplace user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Gateway-assigned identifier
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Marketplace role
    pub role: Role,
    /// Avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// Returns the actor identity this user acts as
    #[must_use]
    pub fn actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.role)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn booking_id_display_roundtrip() {
        let id = BookingId::new("b1");
        assert_eq!(id.as_str(), "b1");
        assert_eq!(format!("{id}"), "b1");
    }

    #[test]
    fn rupiah_is_whole_units() {
        let price = Rupiah::new(300_000);
        assert_eq!(price.amount(), 300_000);
        assert!(!price.is_zero());
        assert_eq!(format!("{price}"), "Rp300000");
    }

    #[test]
    fn role_uses_wire_vocabulary() {
        let json = serde_json::to_string(&Role::Traveler).unwrap();
        assert_eq!(json, "\"wisatawan\"");
        let role: Role = serde_json::from_str("\"pemandu\"").unwrap();
        assert_eq!(role, Role::Guide);
    }

    #[test]
    fn booking_deserializes_from_wire_shape() {
        let json = r#"{
            "id": "b1",
            "destinationId": "d1",
            "travelerId": "t1",
            "totalPrice": 300000,
            "status": "pending",
            "createdAt": "2025-06-01T08:00:00Z"
        }"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.id, BookingId::new("b1"));
        assert_eq!(booking.total_price, Rupiah::new(300_000));
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.guide_id, None);
        assert_eq!(booking.destination, None);
    }

    #[test]
    fn booking_snapshot_never_serialized() {
        let json = r#"{
            "id": "b1",
            "destinationId": "d1",
            "travelerId": "t1",
            "totalPrice": 1000,
            "status": "confirmed",
            "createdAt": "2025-06-01T08:00:00Z"
        }"#;
        let mut booking: Booking = serde_json::from_str(json).unwrap();
        booking.destination = Some(DestinationSnapshot {
            name: "Pantai Kuta".to_string(),
            image: "https://example.com/kuta.jpg".to_string(),
            location: "Bali".to_string(),
        });
        let out = serde_json::to_string(&booking).unwrap();
        assert!(!out.contains("Pantai Kuta"));
    }

    #[test]
    fn destination_snapshot_copies_display_fields() {
        let destination = Destination {
            id: DestinationId::new("d1"),
            name: "Candi Borobudur".to_string(),
            description: "Candi Buddha terbesar di dunia".to_string(),
            location: "Magelang".to_string(),
            region: "Jawa Tengah".to_string(),
            price: Rupiah::new(250_000),
            rating: 4.8,
            image: "https://example.com/borobudur.jpg".to_string(),
            manager_id: None,
        };
        let snapshot = destination.snapshot();
        assert_eq!(snapshot.name, "Candi Borobudur");
        assert_eq!(snapshot.location, "Magelang");
    }
}
