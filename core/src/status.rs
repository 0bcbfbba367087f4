//! The booking lifecycle state machine.
//!
//! Four states, four legal edges, two terminal states. Legality is a pure
//! function of the `(current, target)` pair; role gating lives in
//! [`crate::policy`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a booking.
///
/// A booking is created in `Pending` and only ever moves along the legal
/// edges:
///
/// ```text
/// pending ──► confirmed ──► completed
///    │             │
///    ▼             ▼
/// cancelled ◄──────┘
/// ```
///
/// `Completed` and `Cancelled` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Created by a traveler, awaiting the guide's decision
    Pending,
    /// Accepted by the assigned guide
    Confirmed,
    /// Marked finished by the traveler after the tour
    Completed,
    /// Rejected by the guide or cancelled by a party
    Cancelled,
}

impl BookingStatus {
    /// Every status, in declaration order. Handy for exhaustive table tests.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Checks whether this status admits no outgoing transition
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Checks whether `(self, target)` is a legal edge of the lifecycle graph
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Completed | Self::Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{name}")
    }
}
