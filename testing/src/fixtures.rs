//! Ready-made domain entities for test setups.
//!
//! All timestamps come from [`crate::test_clock`] so fixtures compare equal
//! across runs.

use crate::mocks::test_clock;
use chrono::NaiveDate;
use jelajah_core::environment::Clock;
use jelajah_core::status::BookingStatus;
use jelajah_core::types::{
    Booking, BookingId, Destination, DestinationId, Role, Rupiah, ScheduleId, TourSchedule, User,
    UserId,
};

/// A pending booking with the standard fixture price (Rp300000)
#[must_use]
pub fn pending_booking(
    id: impl Into<String>,
    destination_id: impl Into<String>,
    traveler_id: impl Into<String>,
) -> Booking {
    booking_with_status(id, destination_id, traveler_id, BookingStatus::Pending)
}

/// A booking in an arbitrary lifecycle state
#[must_use]
pub fn booking_with_status(
    id: impl Into<String>,
    destination_id: impl Into<String>,
    traveler_id: impl Into<String>,
    status: BookingStatus,
) -> Booking {
    Booking {
        id: BookingId::new(id),
        destination_id: DestinationId::new(destination_id),
        traveler_id: UserId::new(traveler_id),
        guide_id: Some(UserId::new("g1")),
        total_price: Rupiah::new(300_000),
        status,
        created_at: test_clock().now(),
        destination: None,
    }
}

/// A destination with the given id and price
#[must_use]
pub fn destination(id: impl Into<String>, price: Rupiah) -> Destination {
    let id = id.into();
    Destination {
        name: format!("Destinasi {id}"),
        id: DestinationId::new(id),
        description: "Destinasi wisata untuk pengujian".to_string(),
        location: "Bali".to_string(),
        region: "Bali".to_string(),
        price,
        rating: 4.5,
        image: "https://example.com/destination.jpg".to_string(),
        manager_id: None,
    }
}

/// A tour schedule for the given destination
///
/// # Panics
///
/// Panics if the hardcoded fixture date is invalid, which cannot happen.
#[must_use]
#[allow(clippy::expect_used)]
pub fn schedule(id: impl Into<String>, destination_id: impl Into<String>) -> TourSchedule {
    let destination_id = destination_id.into();
    TourSchedule {
        id: ScheduleId::new(id),
        destination_name: format!("Destinasi {destination_id}"),
        destination_id: DestinationId::new(destination_id),
        date: NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid fixture date"),
        time: chrono::NaiveTime::from_hms_opt(8, 0, 0).expect("valid fixture time"),
        duration_hours: 4,
        max_capacity: 10,
        price: Rupiah::new(350_000),
        is_available: true,
        description: None,
    }
}

/// A user whose email is derived from the id (`user-<id>@example.com`)
#[must_use]
pub fn user(id: impl Into<String>, role: Role) -> User {
    let id = id.into();
    User {
        name: format!("User {id}"),
        email: format!("user-{id}@example.com"),
        id: UserId::new(id),
        role,
        avatar: None,
    }
}
