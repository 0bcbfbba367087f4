//! Guide tour-schedule routes.

use crate::client::{ApiClient, Envelope};
use async_trait::async_trait;
use jelajah_core::gateway::{GatewayResult, NewSchedule, ScheduleGateway, ScheduleUpdate};
use jelajah_core::types::{ScheduleId, TourSchedule};

#[async_trait]
impl ScheduleGateway for ApiClient {
    async fn list_schedules(&self) -> GatewayResult<Vec<TourSchedule>> {
        let envelope: Envelope<Vec<TourSchedule>> =
            self.send_json(self.get("/pemandu/schedules")).await?;
        Ok(envelope.data)
    }

    async fn create_schedule(&self, schedule: &NewSchedule) -> GatewayResult<TourSchedule> {
        let envelope: Envelope<TourSchedule> = self
            .send_json(self.post("/pemandu/schedules").json(schedule))
            .await?;
        Ok(envelope.data)
    }

    async fn update_schedule(
        &self,
        id: &ScheduleId,
        update: &ScheduleUpdate,
    ) -> GatewayResult<TourSchedule> {
        let envelope: Envelope<TourSchedule> = self
            .send_json(self.put(&format!("/pemandu/schedules/{id}")).json(update))
            .await?;
        Ok(envelope.data)
    }

    async fn delete_schedule(&self, id: &ScheduleId) -> GatewayResult<()> {
        self.send_unit(self.delete(&format!("/pemandu/schedules/{id}")))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use jelajah_core::gateway::ScheduleUpdate;
    use jelajah_core::types::Rupiah;

    #[test]
    fn partial_update_omits_unset_fields() {
        let update = ScheduleUpdate {
            price: Some(Rupiah::new(400_000)),
            is_available: Some(false),
            ..ScheduleUpdate::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"price":400000,"isAvailable":false}"#
        );
    }

    #[test]
    fn duration_and_description_are_updatable() {
        let update = ScheduleUpdate {
            duration_hours: Some(6),
            description: Some("Sunrise trek".to_string()),
            ..ScheduleUpdate::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"durationHours":6,"description":"Sunrise trek"}"#
        );
    }
}
