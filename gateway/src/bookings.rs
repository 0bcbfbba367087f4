//! Booking routes.

use crate::client::{ApiClient, Envelope};
use async_trait::async_trait;
use jelajah_core::gateway::{BookingFilter, BookingGateway, GatewayResult};
use jelajah_core::status::BookingStatus;
use jelajah_core::types::{Booking, BookingId, DestinationId};
use serde::Serialize;

/// Body for `POST /booking`. The create route keeps the original wire
/// field name `destinasiId`.
#[derive(Debug, Serialize)]
struct CreateBookingBody<'a> {
    #[serde(rename = "destinasiId")]
    destination_id: &'a DestinationId,
}

/// Body for `PATCH /booking/:id`
#[derive(Debug, Serialize)]
struct UpdateStatusBody {
    status: BookingStatus,
}

#[async_trait]
impl BookingGateway for ApiClient {
    async fn create_booking(&self, destination_id: &DestinationId) -> GatewayResult<Booking> {
        let body = CreateBookingBody { destination_id };
        let envelope: Envelope<Booking> =
            self.send_json(self.post("/booking").json(&body)).await?;
        Ok(envelope.data)
    }

    async fn fetch_booking(&self, id: &BookingId) -> GatewayResult<Booking> {
        let envelope: Envelope<Booking> = self
            .send_json(self.get(&format!("/booking/{id}")))
            .await?;
        Ok(envelope.data)
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> GatewayResult<Vec<Booking>> {
        // The gateway scopes both routes by the bearer token; the filter
        // only selects which side of the marketplace to ask for.
        let path = match filter {
            BookingFilter::ForTraveler(_) => "/booking/myBookings",
            BookingFilter::ForGuide(_) => "/pemandu/bookings",
        };
        let envelope: Envelope<Vec<Booking>> = self.send_json(self.get(path)).await?;
        Ok(envelope.data)
    }

    async fn update_status(&self, id: &BookingId, status: BookingStatus) -> GatewayResult<Booking> {
        let body = UpdateStatusBody { status };
        let envelope: Envelope<Booking> = self
            .send_json(self.patch(&format!("/booking/{id}")).json(&body))
            .await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn create_body_uses_the_original_field_name() {
        let id = DestinationId::new("d1");
        let body = CreateBookingBody {
            destination_id: &id,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"destinasiId":"d1"}"#
        );
    }

    #[test]
    fn status_body_is_a_lowercase_string() {
        let body = UpdateStatusBody {
            status: BookingStatus::Confirmed,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"status":"confirmed"}"#
        );
    }
}
