//! The destination catalog.

use jelajah_core::error::GatewayError;
use jelajah_core::gateway::{DestinationGateway, DestinationQuery, NewDestination};
use jelajah_core::types::{Actor, Destination, DestinationId, Role};
use std::sync::Arc;
use thiserror::Error;

/// Failures surfaced by the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No destination with this id exists
    #[error("destination {id} not found")]
    NotFound {
        /// The id that was looked up
        id: DestinationId,
    },

    /// The caller is not allowed to perform this operation
    #[error("unauthorized: {reason}")]
    Unauthorized {
        /// Why the operation was refused
        reason: String,
    },

    /// The gateway call itself failed
    #[error("catalog request failed")]
    Gateway(#[source] GatewayError),
}

/// Read and (for managers) write access to the destination catalog.
///
/// Browsing is open to every role; creation is gated to managers and
/// admins before the gateway is contacted.
pub struct DestinationCatalog {
    gateway: Arc<dyn DestinationGateway>,
    destinations: Vec<Destination>,
}

impl DestinationCatalog {
    /// Creates a catalog with an empty cache
    #[must_use]
    pub fn new(gateway: Arc<dyn DestinationGateway>) -> Self {
        Self {
            gateway,
            destinations: Vec::new(),
        }
    }

    /// The cached destinations from the last browse
    #[must_use]
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// Fetches destinations matching the query, replacing the cache.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Unauthorized`] when the session token is rejected,
    /// [`CatalogError::Gateway`] for any other gateway failure. The cache
    /// keeps its previous contents on failure.
    pub async fn browse(
        &mut self,
        query: &DestinationQuery,
    ) -> Result<&[Destination], CatalogError> {
        let destinations = self
            .gateway
            .list_destinations(query)
            .await
            .map_err(map_gateway)?;
        self.destinations = destinations;
        Ok(&self.destinations)
    }

    /// Fetches a single destination by id.
    ///
    /// # Errors
    ///
    /// [`CatalogError::NotFound`] when the destination does not exist;
    /// otherwise the [`Self::browse`] contract.
    pub async fn get(&self, id: &DestinationId) -> Result<Destination, CatalogError> {
        self.gateway.fetch_destination(id).await.map_err(|e| match e {
            GatewayError::NotFound => CatalogError::NotFound { id: id.clone() },
            other => map_gateway(other),
        })
    }

    /// Publishes a new destination on behalf of a manager.
    ///
    /// Only managers and admins may publish; other roles are refused
    /// locally without a gateway call. The created destination is appended
    /// to the cache.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Unauthorized`] for a role refusal or rejected
    /// token; [`CatalogError::Gateway`] for any other gateway failure.
    pub async fn publish(
        &mut self,
        destination: &NewDestination,
        actor: &Actor,
    ) -> Result<Destination, CatalogError> {
        if !matches!(actor.role, Role::Manager | Role::Admin) {
            return Err(CatalogError::Unauthorized {
                reason: format!("{} cannot publish destinations", actor.role),
            });
        }

        let created = self
            .gateway
            .create_destination(destination)
            .await
            .map_err(map_gateway)?;
        tracing::info!(destination = %created.id, name = %created.name, "destination published");
        self.destinations.push(created.clone());
        Ok(created)
    }
}

fn map_gateway(err: GatewayError) -> CatalogError {
    match err {
        GatewayError::Unauthorized => CatalogError::Unauthorized {
            reason: "gateway rejected the session token".to_string(),
        },
        other => CatalogError::Gateway(other),
    }
}
