//! Walks a booking through its full lifecycle against the in-memory
//! gateway: login, browse, book, confirm, complete.
//!
//! Run with `cargo run -p booking-flow`. Set `RUST_LOG=info` to see the
//! structured lifecycle events.

use anyhow::Result;
use jelajah_client::{BookingManager, DestinationCatalog, Session};
use jelajah_core::gateway::DestinationQuery;
use jelajah_core::status::BookingStatus;
use jelajah_core::token::TokenStore;
use jelajah_core::types::{Role, Rupiah, UserId};
use jelajah_testing::{MockGateway, fixtures};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let gateway = Arc::new(seeded_gateway());

    // Authenticate as the traveler; the token lands in the shared store.
    let tokens = TokenStore::new();
    let mut session = Session::new(gateway.clone(), tokens);
    let user = session.login("budi@example.com", "rahasia").await?;
    tracing::info!(name = %user.name, role = %user.role, "logged in");
    let traveler = session
        .actor()
        .ok_or_else(|| anyhow::anyhow!("no authenticated actor"))?;

    // Browse the catalog and pick the first destination.
    let mut catalog = DestinationCatalog::new(gateway.clone());
    let destinations = catalog.browse(&DestinationQuery::default()).await?;
    let destination = destinations
        .first()
        .ok_or_else(|| anyhow::anyhow!("catalog is empty"))?
        .clone();
    tracing::info!(name = %destination.name, price = %destination.price, "destination chosen");

    // Create the booking and walk it to completion.
    let mut bookings = BookingManager::new(gateway.clone(), gateway.clone());
    let booking = bookings.create(&destination.id, &traveler).await?;
    tracing::info!(booking = %booking.id, status = %booking.status, "booking created");

    let confirmed = bookings
        .transition(&booking.id, BookingStatus::Confirmed, Role::Guide)
        .await?;
    tracing::info!(status = %confirmed.status, "guide confirmed");

    let completed = bookings
        .transition(&booking.id, BookingStatus::Completed, traveler.role)
        .await?;
    tracing::info!(status = %completed.status, "trip finished");

    let detail = bookings.get_detail(&booking.id).await?;
    let place = detail
        .destination
        .as_ref()
        .map_or("(unknown)", |snapshot| snapshot.location.as_str());
    println!(
        "receipt: {} at {} for {}, status {}",
        detail.id, place, detail.total_price, detail.status
    );

    Ok(())
}

fn seeded_gateway() -> MockGateway {
    let gateway = MockGateway::new();
    gateway.seed_destination(fixtures::destination("d1", Rupiah::new(350_000)));
    gateway.seed_user(
        "rahasia",
        jelajah_core::types::User {
            id: UserId::new("t1"),
            name: "Budi".to_string(),
            email: "budi@example.com".to_string(),
            role: Role::Traveler,
            avatar: None,
        },
    );
    gateway.acting_traveler(UserId::new("t1"));
    gateway.assigned_guide(UserId::new("g1"));
    gateway
}
