//! Error taxonomy for the booking managers and the remote gateway.

use crate::policy::TransitionDenied;
use crate::status::BookingStatus;
use crate::types::BookingId;
use thiserror::Error;

/// Errors surfaced by the remote gateway adapter.
///
/// Transport-level failures (timeout, connection) and application-level
/// failures (the gateway's own encoded errors) are kept distinct so the
/// caller can decide what is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The request did not complete within the transport timeout
    #[error("gateway request timed out")]
    Timeout,

    /// The request failed at the transport level (connection, DNS, TLS)
    #[error("gateway transport failure: {0}")]
    Transport(String),

    /// Bearer token missing, expired, or rejected (401/403)
    #[error("gateway rejected the session token")]
    Unauthorized,

    /// The gateway reports no such resource (404)
    #[error("resource not found on the gateway")]
    NotFound,

    /// The request conflicts with gateway-side state (409)
    #[error("gateway conflict: {0}")]
    Conflict(String),

    /// Any other application-level error payload
    #[error("gateway error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error body returned by the gateway
        message: String,
    },

    /// The response body could not be decoded
    #[error("gateway response could not be decoded: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Checks whether retrying the call might succeed.
    ///
    /// Timeouts, transport failures, and 5xx responses are transient;
    /// validation-style failures (4xx) are terminal and not worth retrying.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Timeout | Self::Transport(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Unauthorized | Self::NotFound | Self::Conflict(_) | Self::Decode(_) => false,
        }
    }
}

/// Errors returned by the booking lifecycle manager.
///
/// All failures are explicit values at the public boundary; the manager
/// never panics across it. Local failures (`InvalidTransition`,
/// `Unauthorized` role denials) are detected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// Referenced booking does not exist in cache or on the gateway
    #[error("booking {id} not found")]
    NotFound {
        /// Identifier that failed to resolve
        id: BookingId,
    },

    /// Requested status change is not a legal lifecycle edge
    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status
        from: BookingStatus,
        /// Requested status
        to: BookingStatus,
    },

    /// Acting role is not permitted, or the session token was rejected
    #[error("unauthorized: {reason}")]
    Unauthorized {
        /// What was denied
        reason: String,
    },

    /// The gateway failed while creating a booking
    #[error("booking creation failed")]
    CreationFailed(#[source] GatewayError),

    /// The gateway failed while persisting a status change
    #[error("status transition failed")]
    TransitionFailed(#[source] GatewayError),

    /// The gateway failed while fetching bookings
    #[error("booking fetch failed")]
    FetchFailed(#[source] GatewayError),
}

impl From<TransitionDenied> for BookingError {
    fn from(denied: TransitionDenied) -> Self {
        match denied {
            TransitionDenied::IllegalEdge { from, to } => Self::InvalidTransition { from, to },
            TransitionDenied::RoleNotPermitted { .. } => Self::Unauthorized {
                reason: denied.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        assert!(GatewayError::Timeout.is_transient());
        assert!(GatewayError::Transport("connection reset".to_string()).is_transient());
        assert!(
            GatewayError::Api {
                status: 503,
                message: "unavailable".to_string()
            }
            .is_transient()
        );
        assert!(!GatewayError::Unauthorized.is_transient());
        assert!(!GatewayError::NotFound.is_transient());
        assert!(
            !GatewayError::Api {
                status: 422,
                message: "invalid".to_string()
            }
            .is_transient()
        );
    }

    #[test]
    fn denied_transition_maps_onto_the_public_taxonomy() {
        let illegal = TransitionDenied::IllegalEdge {
            from: BookingStatus::Pending,
            to: BookingStatus::Completed,
        };
        assert_eq!(
            BookingError::from(illegal),
            BookingError::InvalidTransition {
                from: BookingStatus::Pending,
                to: BookingStatus::Completed,
            }
        );

        let gated = TransitionDenied::RoleNotPermitted {
            role: crate::types::Role::Traveler,
            from: BookingStatus::Pending,
            to: BookingStatus::Confirmed,
        };
        assert!(matches!(
            BookingError::from(gated),
            BookingError::Unauthorized { .. }
        ));
    }
}
