//! Mock implementations of the gateway capabilities and the clock.

use chrono::{DateTime, Utc};
use jelajah_core::environment::Clock;
use jelajah_core::error::GatewayError;
use jelajah_core::gateway::{
    AuthGateway, AuthSession, BookingFilter, BookingGateway, DestinationGateway, DestinationQuery,
    GatewayResult, NewDestination, NewSchedule, NewUser, ScheduleGateway, ScheduleUpdate,
};
use jelajah_core::status::BookingStatus;
use jelajah_core::types::{
    Booking, BookingId, Destination, DestinationId, Rupiah, ScheduleId, TourSchedule, User, UserId,
};
use std::sync::{Arc, Mutex, PoisonError};

/// Fixed clock for deterministic tests
///
/// Always returns the same time, making tests reproducible.
#[derive(Debug, Clone)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Create a default fixed clock for tests (2025-06-01 00:00:00 UTC)
///
/// # Panics
///
/// This function will panic if the hardcoded timestamp fails to parse,
/// which should never happen in practice.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_clock() -> FixedClock {
    FixedClock::new(
        DateTime::parse_from_rfc3339("2025-06-01T00:00:00Z")
            .expect("hardcoded timestamp should always parse")
            .with_timezone(&Utc),
    )
}

/// Per-operation call counters for the booking capability.
///
/// The transition scenarios assert not just outcomes but how many network
/// calls were made - in particular that locally rejected transitions make
/// zero calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallCounts {
    /// `create_booking` invocations
    pub create_booking: usize,
    /// `fetch_booking` invocations
    pub fetch_booking: usize,
    /// `list_bookings` invocations
    pub list_bookings: usize,
    /// `update_status` invocations
    pub update_status: usize,
}

#[derive(Default)]
struct Inner {
    bookings: Vec<Booking>,
    destinations: Vec<Destination>,
    schedules: Vec<TourSchedule>,
    users: Vec<(String, User)>,
    counts: CallCounts,
    fail_next: Option<GatewayError>,
    traveler: Option<UserId>,
    assigned_guide: Option<UserId>,
    next_id: u32,
}

/// In-memory implementation of every gateway capability.
///
/// Seed it with entities, optionally script the next call to fail, run the
/// managers against it, then assert on state and call counts. Ids are
/// assigned sequentially (`b1`, `b2`, ...) so tests stay deterministic.
pub struct MockGateway {
    clock: Arc<dyn Clock>,
    inner: Mutex<Inner>,
}

impl MockGateway {
    /// Creates a mock with the default fixed clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(test_clock()))
    }

    /// Creates a mock with an explicit clock
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets the traveler newly created bookings belong to
    pub fn acting_traveler(&self, traveler: UserId) {
        self.lock().traveler = Some(traveler);
    }

    /// Sets the guide assigned to newly created bookings
    pub fn assigned_guide(&self, guide: UserId) {
        self.lock().assigned_guide = Some(guide);
    }

    /// Seeds a booking record
    pub fn seed_booking(&self, booking: Booking) {
        self.lock().bookings.push(booking);
    }

    /// Seeds a destination record
    pub fn seed_destination(&self, destination: Destination) {
        self.lock().destinations.push(destination);
    }

    /// Seeds a tour schedule record
    pub fn seed_schedule(&self, schedule: TourSchedule) {
        self.lock().schedules.push(schedule);
    }

    /// Seeds a user with login credentials
    pub fn seed_user(&self, password: impl Into<String>, user: User) {
        self.lock().users.push((password.into(), user));
    }

    /// Makes the next gateway call (any capability) fail with `error`
    pub fn fail_next(&self, error: GatewayError) {
        self.lock().fail_next = Some(error);
    }

    /// Returns a snapshot of the booking call counters
    #[must_use]
    pub fn counts(&self) -> CallCounts {
        self.lock().counts
    }

    /// Returns the stored booking with this id, if any
    #[must_use]
    pub fn booking(&self, id: &BookingId) -> Option<Booking> {
        self.lock().bookings.iter().find(|b| &b.id == id).cloned()
    }

    fn take_failure(inner: &mut Inner) -> GatewayResult<()> {
        match inner.fail_next.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn next_id(inner: &mut Inner, prefix: &str) -> String {
        inner.next_id += 1;
        format!("{prefix}{}", inner.next_id)
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl BookingGateway for MockGateway {
    async fn create_booking(&self, destination_id: &DestinationId) -> GatewayResult<Booking> {
        let mut inner = self.lock();
        inner.counts.create_booking += 1;
        Self::take_failure(&mut inner)?;

        let total_price = inner
            .destinations
            .iter()
            .find(|d| &d.id == destination_id)
            .map_or(Rupiah::new(300_000), |d| d.price);
        let traveler_id = inner
            .traveler
            .clone()
            .unwrap_or_else(|| UserId::new("t1"));
        let id = BookingId::new(Self::next_id(&mut inner, "b"));

        let booking = Booking {
            id: id.clone(),
            destination_id: destination_id.clone(),
            traveler_id,
            guide_id: inner.assigned_guide.clone(),
            total_price,
            status: BookingStatus::Pending,
            created_at: self.clock.now(),
            destination: None,
        };
        inner.bookings.push(booking.clone());
        tracing::info!(booking = %id, destination = %destination_id, "mock booking created");
        Ok(booking)
    }

    async fn fetch_booking(&self, id: &BookingId) -> GatewayResult<Booking> {
        let mut inner = self.lock();
        inner.counts.fetch_booking += 1;
        Self::take_failure(&mut inner)?;
        inner
            .bookings
            .iter()
            .find(|b| &b.id == id)
            .cloned()
            .ok_or(GatewayError::NotFound)
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> GatewayResult<Vec<Booking>> {
        let mut inner = self.lock();
        inner.counts.list_bookings += 1;
        Self::take_failure(&mut inner)?;
        let bookings = match filter {
            BookingFilter::ForTraveler(traveler) => inner
                .bookings
                .iter()
                .filter(|b| &b.traveler_id == traveler)
                .cloned()
                .collect(),
            BookingFilter::ForGuide(guide) => inner
                .bookings
                .iter()
                .filter(|b| b.guide_id.as_ref() == Some(guide))
                .cloned()
                .collect(),
        };
        Ok(bookings)
    }

    async fn update_status(&self, id: &BookingId, status: BookingStatus) -> GatewayResult<Booking> {
        let mut inner = self.lock();
        inner.counts.update_status += 1;
        Self::take_failure(&mut inner)?;
        let booking = inner
            .bookings
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or(GatewayError::NotFound)?;
        booking.status = status;
        tracing::info!(booking = %id, %status, "mock booking status updated");
        Ok(booking.clone())
    }
}

#[async_trait::async_trait]
impl DestinationGateway for MockGateway {
    async fn list_destinations(&self, query: &DestinationQuery) -> GatewayResult<Vec<Destination>> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;
        let destinations = inner
            .destinations
            .iter()
            .filter(|d| match &query.manager_id {
                Some(manager) => d.manager_id.as_ref() == Some(manager),
                None => true,
            })
            .filter(|d| match &query.name {
                Some(name) => d.name.to_lowercase().contains(&name.to_lowercase()),
                None => true,
            })
            .cloned()
            .collect();
        Ok(destinations)
    }

    async fn fetch_destination(&self, id: &DestinationId) -> GatewayResult<Destination> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;
        inner
            .destinations
            .iter()
            .find(|d| &d.id == id)
            .cloned()
            .ok_or(GatewayError::NotFound)
    }

    async fn create_destination(&self, destination: &NewDestination) -> GatewayResult<Destination> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;
        let created = Destination {
            id: DestinationId::new(Self::next_id(&mut inner, "d")),
            name: destination.name.clone(),
            description: destination.description.clone(),
            location: destination.location.clone(),
            region: destination.region.clone(),
            price: destination.price,
            rating: 0.0,
            image: destination.image.clone(),
            manager_id: None,
        };
        inner.destinations.push(created.clone());
        Ok(created)
    }
}

#[async_trait::async_trait]
impl ScheduleGateway for MockGateway {
    async fn list_schedules(&self) -> GatewayResult<Vec<TourSchedule>> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;
        Ok(inner.schedules.clone())
    }

    async fn create_schedule(&self, schedule: &NewSchedule) -> GatewayResult<TourSchedule> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;
        let destination_name = inner
            .destinations
            .iter()
            .find(|d| d.id == schedule.destination_id)
            .map_or_else(String::new, |d| d.name.clone());
        let created = TourSchedule {
            id: ScheduleId::new(Self::next_id(&mut inner, "s")),
            destination_id: schedule.destination_id.clone(),
            destination_name,
            date: schedule.date,
            time: schedule.time,
            duration_hours: schedule.duration_hours,
            max_capacity: schedule.max_capacity,
            price: schedule.price,
            is_available: true,
            description: schedule.description.clone(),
        };
        inner.schedules.push(created.clone());
        Ok(created)
    }

    async fn update_schedule(
        &self,
        id: &ScheduleId,
        update: &ScheduleUpdate,
    ) -> GatewayResult<TourSchedule> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;
        let schedule = inner
            .schedules
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or(GatewayError::NotFound)?;
        if let Some(date) = update.date {
            schedule.date = date;
        }
        if let Some(time) = update.time {
            schedule.time = time;
        }
        if let Some(duration_hours) = update.duration_hours {
            schedule.duration_hours = duration_hours;
        }
        if let Some(max_capacity) = update.max_capacity {
            schedule.max_capacity = max_capacity;
        }
        if let Some(price) = update.price {
            schedule.price = price;
        }
        if let Some(is_available) = update.is_available {
            schedule.is_available = is_available;
        }
        if let Some(description) = &update.description {
            schedule.description = Some(description.clone());
        }
        Ok(schedule.clone())
    }

    async fn delete_schedule(&self, id: &ScheduleId) -> GatewayResult<()> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;
        let before = inner.schedules.len();
        inner.schedules.retain(|s| &s.id != id);
        if inner.schedules.len() == before {
            return Err(GatewayError::NotFound);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl AuthGateway for MockGateway {
    async fn login(&self, email: &str, password: &str) -> GatewayResult<AuthSession> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;
        inner
            .users
            .iter()
            .find(|(stored, user)| user.email == email && stored == password)
            .map(|(_, user)| AuthSession {
                token: format!("mock-token-{}", user.id),
                user: user.clone(),
            })
            .ok_or(GatewayError::Unauthorized)
    }

    async fn register(&self, user: &NewUser) -> GatewayResult<User> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;
        if inner.users.iter().any(|(_, u)| u.email == user.email) {
            return Err(GatewayError::Conflict("email already registered".to_string()));
        }
        let created = User {
            id: UserId::new(Self::next_id(&mut inner, "u")),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            avatar: None,
        };
        inner.users.push((user.password.clone(), created.clone()));
        Ok(created)
    }

    async fn list_users(&self) -> GatewayResult<Vec<User>> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;
        Ok(inner.users.iter().map(|(_, user)| user.clone()).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn fixed_clock_is_deterministic() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids_and_pending_status() {
        let gateway = MockGateway::new();
        let destination = DestinationId::new("d1");

        let first = gateway.create_booking(&destination).await.unwrap();
        let second = gateway.create_booking(&destination).await.unwrap();

        assert_eq!(first.id, BookingId::new("b1"));
        assert_eq!(second.id, BookingId::new("b2"));
        assert_eq!(first.status, BookingStatus::Pending);
        assert_eq!(gateway.counts().create_booking, 2);
    }

    #[tokio::test]
    async fn create_takes_price_from_seeded_destination() {
        let gateway = MockGateway::new();
        gateway.seed_destination(fixtures::destination("d1", Rupiah::new(250_000)));

        let booking = gateway
            .create_booking(&DestinationId::new("d1"))
            .await
            .unwrap();
        assert_eq!(booking.total_price, Rupiah::new(250_000));
    }

    #[tokio::test]
    async fn fail_next_is_one_shot() {
        let gateway = MockGateway::new();
        gateway.seed_booking(fixtures::pending_booking("b1", "d1", "t1"));
        gateway.fail_next(GatewayError::Timeout);

        let id = BookingId::new("b1");
        assert_eq!(
            gateway.fetch_booking(&id).await,
            Err(GatewayError::Timeout)
        );
        assert!(gateway.fetch_booking(&id).await.is_ok());
        assert_eq!(gateway.counts().fetch_booking, 2);
    }

    #[tokio::test]
    async fn list_users_returns_every_seeded_account() {
        let gateway = MockGateway::new();
        gateway.seed_user("rahasia", fixtures::user("u1", jelajah_core::types::Role::Traveler));
        gateway.seed_user("rahasia", fixtures::user("a1", jelajah_core::types::Role::Admin));

        let users = gateway.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn login_requires_matching_credentials() {
        let gateway = MockGateway::new();
        gateway.seed_user("rahasia", fixtures::user("u1", jelajah_core::types::Role::Traveler));

        let err = gateway.login("user-u1@example.com", "salah").await;
        assert_eq!(err, Err(GatewayError::Unauthorized));

        let session = gateway.login("user-u1@example.com", "rahasia").await.unwrap();
        assert_eq!(session.token, "mock-token-u1");
    }
}
