//! Destination catalog routes.

use crate::client::{ApiClient, Envelope};
use async_trait::async_trait;
use jelajah_core::gateway::{
    DestinationGateway, DestinationQuery, GatewayResult, NewDestination,
};
use jelajah_core::types::{Destination, DestinationId};

/// Flattens the optional filters into query parameters
fn query_params(query: &DestinationQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(manager_id) = &query.manager_id {
        params.push(("manager_id", manager_id.to_string()));
    }
    if let Some(category) = &query.category {
        params.push(("category", category.clone()));
    }
    if let Some(name) = &query.name {
        params.push(("name", name.clone()));
    }
    params
}

#[async_trait]
impl DestinationGateway for ApiClient {
    async fn list_destinations(&self, query: &DestinationQuery) -> GatewayResult<Vec<Destination>> {
        let envelope: Envelope<Vec<Destination>> = self
            .send_json(self.get("/destinasi").query(&query_params(query)))
            .await?;
        Ok(envelope.data)
    }

    async fn fetch_destination(&self, id: &DestinationId) -> GatewayResult<Destination> {
        let envelope: Envelope<Destination> = self
            .send_json(self.get(&format!("/destinasi/{id}")))
            .await?;
        Ok(envelope.data)
    }

    async fn create_destination(&self, destination: &NewDestination) -> GatewayResult<Destination> {
        let envelope: Envelope<Destination> = self
            .send_json(self.post("/destinasi").json(destination))
            .await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jelajah_core::types::UserId;

    #[test]
    fn empty_query_produces_no_params() {
        assert!(query_params(&DestinationQuery::default()).is_empty());
    }

    #[test]
    fn filters_map_to_their_query_keys() {
        let query = DestinationQuery {
            manager_id: Some(UserId::new("m1")),
            category: Some("pantai".to_string()),
            name: None,
        };
        assert_eq!(
            query_params(&query),
            vec![
                ("manager_id", "m1".to_string()),
                ("category", "pantai".to_string()),
            ]
        );
    }
}
