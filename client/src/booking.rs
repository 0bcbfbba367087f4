//! The booking lifecycle manager.
//!
//! Owns the client-side view of bookings for the current user - the
//! traveler's trips, the guide's incoming orders, and the last-fetched
//! detail - and enforces that status changes follow the lifecycle graph
//! before any network call is made. Persistence is delegated to the
//! injected [`BookingGateway`]; the cache is only ever updated with what
//! the gateway confirmed, never optimistically.

use jelajah_core::error::{BookingError, GatewayError};
use jelajah_core::gateway::{BookingFilter, BookingGateway, DestinationGateway};
use jelajah_core::policy::authorize_transition;
use jelajah_core::status::BookingStatus;
use jelajah_core::types::{Actor, Booking, BookingId, DestinationId, Role, UserId};
use std::sync::Arc;

/// Client-side manager for a user's bookings.
///
/// Two gateway capabilities are injected: bookings for persistence and
/// destinations for the denormalized snapshot attached to detail fetches.
/// All mutating operations take `&mut self`; the caches have a single
/// writer by construction.
///
/// Two in-flight transitions for the same booking both read the same
/// pre-transition cached status, so both may pass the local checks and
/// reach the gateway; the gateway is the sole arbiter of the final state.
pub struct BookingManager {
    bookings: Arc<dyn BookingGateway>,
    destinations: Arc<dyn DestinationGateway>,
    trips: Vec<Booking>,
    incoming: Vec<Booking>,
    detail: Option<Booking>,
}

impl BookingManager {
    /// Creates a manager with empty caches
    #[must_use]
    pub fn new(
        bookings: Arc<dyn BookingGateway>,
        destinations: Arc<dyn DestinationGateway>,
    ) -> Self {
        Self {
            bookings,
            destinations,
            trips: Vec::new(),
            incoming: Vec::new(),
            detail: None,
        }
    }

    /// The cached traveler trips, in gateway order
    #[must_use]
    pub fn trips(&self) -> &[Booking] {
        &self.trips
    }

    /// The cached incoming orders for the guide
    #[must_use]
    pub fn incoming(&self) -> &[Booking] {
        &self.incoming
    }

    /// The last-fetched booking detail, if any
    #[must_use]
    pub fn detail(&self) -> Option<&Booking> {
        self.detail.as_ref()
    }

    /// Looks a booking up across every cache
    #[must_use]
    pub fn find(&self, id: &BookingId) -> Option<&Booking> {
        self.trips
            .iter()
            .chain(self.incoming.iter())
            .chain(self.detail.iter())
            .find(|b| &b.id == id)
    }

    /// Requests a new booking for a destination.
    ///
    /// Only a traveler may book. On success the booking is inserted into
    /// the trips cache exactly as the gateway returned it - the gateway's
    /// status is trusted, not assumed. On failure nothing is mutated.
    ///
    /// # Errors
    ///
    /// [`BookingError::Unauthorized`] when the actor is not a traveler or
    /// the session token is rejected; [`BookingError::CreationFailed`] for
    /// any other gateway failure.
    pub async fn create(
        &mut self,
        destination_id: &DestinationId,
        actor: &Actor,
    ) -> Result<Booking, BookingError> {
        if actor.role != Role::Traveler {
            return Err(BookingError::Unauthorized {
                reason: format!("{} cannot create a booking", actor.role),
            });
        }

        let booking = self
            .bookings
            .create_booking(destination_id)
            .await
            .map_err(|e| match e {
                GatewayError::Unauthorized => token_rejected(),
                other => BookingError::CreationFailed(other),
            })?;

        tracing::info!(
            booking = %booking.id,
            destination = %destination_id,
            status = %booking.status,
            "booking created"
        );
        self.trips.push(booking.clone());
        Ok(booking)
    }

    /// Fetches all bookings owned by the traveler, replacing the trips
    /// cache wholesale. Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// [`BookingError::FetchFailed`] on gateway failure (the cache keeps
    /// its previous contents), or [`BookingError::Unauthorized`] when the
    /// session token is rejected.
    pub async fn list_for_traveler(
        &mut self,
        traveler_id: &UserId,
    ) -> Result<&[Booking], BookingError> {
        let filter = BookingFilter::ForTraveler(traveler_id.clone());
        let bookings = self
            .bookings
            .list_bookings(&filter)
            .await
            .map_err(fetch_error)?;
        self.trips = bookings;
        Ok(&self.trips)
    }

    /// Fetches all bookings assigned to the guide, replacing the incoming
    /// cache wholesale.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::list_for_traveler`].
    pub async fn list_for_guide(&mut self, guide_id: &UserId) -> Result<&[Booking], BookingError> {
        let filter = BookingFilter::ForGuide(guide_id.clone());
        let bookings = self
            .bookings
            .list_bookings(&filter)
            .await
            .map_err(fetch_error)?;
        self.incoming = bookings;
        Ok(&self.incoming)
    }

    /// Fetches a single booking plus its destination snapshot.
    ///
    /// The snapshot is display-only and not authoritative, so a failure to
    /// fetch it is logged and swallowed rather than failing the detail.
    ///
    /// # Errors
    ///
    /// [`BookingError::NotFound`] when the gateway reports no such booking;
    /// otherwise the [`Self::list_for_traveler`] contract.
    pub async fn get_detail(&mut self, id: &BookingId) -> Result<&Booking, BookingError> {
        let mut booking = self
            .bookings
            .fetch_booking(id)
            .await
            .map_err(|e| match e {
                GatewayError::NotFound => BookingError::NotFound { id: id.clone() },
                GatewayError::Unauthorized => token_rejected(),
                other => BookingError::FetchFailed(other),
            })?;

        match self.destinations.fetch_destination(&booking.destination_id).await {
            Ok(destination) => booking.destination = Some(destination.snapshot()),
            Err(error) => {
                tracing::warn!(
                    booking = %booking.id,
                    destination = %booking.destination_id,
                    %error,
                    "destination snapshot unavailable"
                );
            }
        }

        Ok(self.detail.insert(booking))
    }

    /// Applies a status transition to a cached booking.
    ///
    /// Legality of the edge and the acting role are validated locally
    /// first; a locally rejected transition issues no gateway call. On
    /// success every cached copy is replaced with the booking the gateway
    /// returned - the gateway's status is authoritative, not the requested
    /// one. On gateway failure the caches are left untouched.
    ///
    /// # Errors
    ///
    /// [`BookingError::NotFound`] when the booking is not cached;
    /// [`BookingError::InvalidTransition`] for an illegal edge;
    /// [`BookingError::Unauthorized`] for a role denial or rejected token;
    /// [`BookingError::TransitionFailed`] when the gateway call fails.
    pub async fn transition(
        &mut self,
        id: &BookingId,
        target: BookingStatus,
        acting_role: Role,
    ) -> Result<Booking, BookingError> {
        let current = self
            .find(id)
            .map(|b| b.status)
            .ok_or_else(|| BookingError::NotFound { id: id.clone() })?;

        authorize_transition(acting_role, current, target)?;

        let updated = self
            .bookings
            .update_status(id, target)
            .await
            .map_err(|e| match e {
                GatewayError::Unauthorized => token_rejected(),
                other => BookingError::TransitionFailed(other),
            })?;

        tracing::info!(
            booking = %updated.id,
            from = %current,
            to = %updated.status,
            role = %acting_role,
            "booking status transitioned"
        );
        self.commit(&updated);
        Ok(updated)
    }

    /// Replaces every cached copy of the booking, keeping a previously
    /// attached snapshot when the gateway copy carries none.
    fn commit(&mut self, updated: &Booking) {
        let cached = self
            .trips
            .iter_mut()
            .chain(self.incoming.iter_mut())
            .chain(self.detail.iter_mut());
        for entry in cached {
            if entry.id == updated.id {
                let snapshot = entry.destination.take();
                *entry = updated.clone();
                if entry.destination.is_none() {
                    entry.destination = snapshot;
                }
            }
        }
    }
}

/// The gateway rejected the bearer token (missing, expired, or revoked)
fn token_rejected() -> BookingError {
    BookingError::Unauthorized {
        reason: "gateway rejected the session token".to_string(),
    }
}

/// Maps gateway failures on read paths onto the public taxonomy
fn fetch_error(err: GatewayError) -> BookingError {
    match err {
        GatewayError::Unauthorized => token_rejected(),
        other => BookingError::FetchFailed(other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use jelajah_testing::{MockGateway, fixtures};

    fn manager(gateway: &Arc<MockGateway>) -> BookingManager {
        BookingManager::new(gateway.clone(), gateway.clone())
    }

    #[tokio::test]
    async fn only_travelers_create_bookings() {
        let gateway = Arc::new(MockGateway::new());
        let mut bookings = manager(&gateway);

        let result = bookings
            .create(&DestinationId::new("d1"), &Actor::guide("g1"))
            .await;

        assert!(matches!(result, Err(BookingError::Unauthorized { .. })));
        assert_eq!(gateway.counts().create_booking, 0);
        assert!(bookings.trips().is_empty());
    }

    #[tokio::test]
    async fn detail_attaches_the_destination_snapshot() {
        let gateway = Arc::new(MockGateway::new());
        gateway.seed_destination(fixtures::destination(
            "d1",
            jelajah_core::types::Rupiah::new(250_000),
        ));
        gateway.seed_booking(fixtures::pending_booking("b1", "d1", "t1"));
        let mut bookings = manager(&gateway);

        let detail = bookings.get_detail(&BookingId::new("b1")).await.unwrap();
        let snapshot = detail.destination.as_ref().unwrap();
        assert_eq!(snapshot.name, "Destinasi d1");
    }

    #[tokio::test]
    async fn detail_survives_a_missing_snapshot() {
        let gateway = Arc::new(MockGateway::new());
        gateway.seed_booking(fixtures::pending_booking("b1", "d-unknown", "t1"));
        let mut bookings = manager(&gateway);

        let detail = bookings.get_detail(&BookingId::new("b1")).await.unwrap();
        assert_eq!(detail.destination, None);
    }

    #[tokio::test]
    async fn detail_of_a_missing_booking_is_not_found() {
        let gateway = Arc::new(MockGateway::new());
        let mut bookings = manager(&gateway);

        let result = bookings.get_detail(&BookingId::new("nope")).await;
        assert!(matches!(
            result,
            Err(BookingError::NotFound { id }) if id == BookingId::new("nope")
        ));
    }

    #[tokio::test]
    async fn transition_of_an_uncached_booking_is_not_found_without_a_call() {
        let gateway = Arc::new(MockGateway::new());
        gateway.seed_booking(fixtures::pending_booking("b1", "d1", "t1"));
        let mut bookings = manager(&gateway);

        // Cache never populated: even a booking the gateway knows about is
        // NotFound locally.
        let result = bookings
            .transition(&BookingId::new("b1"), BookingStatus::Confirmed, Role::Guide)
            .await;
        assert!(matches!(result, Err(BookingError::NotFound { .. })));
        assert_eq!(gateway.counts().update_status, 0);
    }

    #[tokio::test]
    async fn commit_keeps_a_previously_attached_snapshot() {
        let gateway = Arc::new(MockGateway::new());
        gateway.seed_destination(fixtures::destination(
            "d1",
            jelajah_core::types::Rupiah::new(250_000),
        ));
        gateway.seed_booking(fixtures::pending_booking("b1", "d1", "t1"));
        let mut bookings = manager(&gateway);

        let id = BookingId::new("b1");
        bookings.get_detail(&id).await.unwrap();
        bookings
            .transition(&id, BookingStatus::Confirmed, Role::Guide)
            .await
            .unwrap();

        let detail = bookings.detail().unwrap();
        assert_eq!(detail.status, BookingStatus::Confirmed);
        assert!(detail.destination.is_some(), "snapshot must survive commit");
    }
}
