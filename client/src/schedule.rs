//! A guide's published tour slots.

use jelajah_core::error::GatewayError;
use jelajah_core::gateway::{NewSchedule, ScheduleGateway, ScheduleUpdate};
use jelajah_core::types::{Actor, Role, ScheduleId, TourSchedule};
use std::sync::Arc;
use thiserror::Error;

/// Failures surfaced by the schedule manager
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// No schedule with this id exists
    #[error("schedule {id} not found")]
    NotFound {
        /// The id that was looked up
        id: ScheduleId,
    },

    /// The caller is not allowed to perform this operation
    #[error("unauthorized: {reason}")]
    Unauthorized {
        /// Why the operation was refused
        reason: String,
    },

    /// The gateway call itself failed
    #[error("schedule request failed")]
    Gateway(#[source] GatewayError),
}

/// Manages the authenticated guide's tour slots.
///
/// The gateway scopes schedules by the bearer token; this manager
/// additionally refuses mutations locally when the actor is not a guide
/// or admin, so a mis-wired view never reaches the network.
pub struct ScheduleManager {
    gateway: Arc<dyn ScheduleGateway>,
    schedules: Vec<TourSchedule>,
}

impl ScheduleManager {
    /// Creates a manager with an empty cache
    #[must_use]
    pub fn new(gateway: Arc<dyn ScheduleGateway>) -> Self {
        Self {
            gateway,
            schedules: Vec::new(),
        }
    }

    /// The cached schedules from the last refresh
    #[must_use]
    pub fn schedules(&self) -> &[TourSchedule] {
        &self.schedules
    }

    /// Fetches the guide's schedules, replacing the cache wholesale.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::Unauthorized`] when the session token is rejected,
    /// [`ScheduleError::Gateway`] for any other failure. The cache keeps
    /// its previous contents on failure.
    pub async fn refresh(&mut self) -> Result<&[TourSchedule], ScheduleError> {
        let schedules = self.gateway.list_schedules().await.map_err(map_gateway)?;
        self.schedules = schedules;
        Ok(&self.schedules)
    }

    /// Publishes a new tour slot.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::Unauthorized`] when the actor may not manage
    /// schedules or the token is rejected; [`ScheduleError::Gateway`] for
    /// any other failure.
    pub async fn publish(
        &mut self,
        schedule: &NewSchedule,
        actor: &Actor,
    ) -> Result<TourSchedule, ScheduleError> {
        check_scheduler(actor)?;
        let created = self
            .gateway
            .create_schedule(schedule)
            .await
            .map_err(map_gateway)?;
        tracing::info!(
            schedule = %created.id,
            destination = %created.destination_id,
            date = %created.date,
            "tour schedule published"
        );
        self.schedules.push(created.clone());
        Ok(created)
    }

    /// Applies a partial update to a slot and commits the gateway's copy
    /// to the cache.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::NotFound`] when the schedule does not exist;
    /// otherwise the [`Self::publish`] contract.
    pub async fn update(
        &mut self,
        id: &ScheduleId,
        update: &ScheduleUpdate,
        actor: &Actor,
    ) -> Result<TourSchedule, ScheduleError> {
        check_scheduler(actor)?;
        let updated = self
            .gateway
            .update_schedule(id, update)
            .await
            .map_err(|e| match e {
                GatewayError::NotFound => ScheduleError::NotFound { id: id.clone() },
                other => map_gateway(other),
            })?;
        if let Some(entry) = self.schedules.iter_mut().find(|s| &s.id == id) {
            *entry = updated.clone();
        }
        Ok(updated)
    }

    /// Removes a slot from the gateway and the cache.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::update`].
    pub async fn remove(&mut self, id: &ScheduleId, actor: &Actor) -> Result<(), ScheduleError> {
        check_scheduler(actor)?;
        self.gateway
            .delete_schedule(id)
            .await
            .map_err(|e| match e {
                GatewayError::NotFound => ScheduleError::NotFound { id: id.clone() },
                other => map_gateway(other),
            })?;
        self.schedules.retain(|s| &s.id != id);
        Ok(())
    }
}

fn check_scheduler(actor: &Actor) -> Result<(), ScheduleError> {
    if matches!(actor.role, Role::Guide | Role::Admin) {
        Ok(())
    } else {
        Err(ScheduleError::Unauthorized {
            reason: format!("{} cannot manage tour schedules", actor.role),
        })
    }
}

fn map_gateway(err: GatewayError) -> ScheduleError {
    match err {
        GatewayError::Unauthorized => ScheduleError::Unauthorized {
            reason: "gateway rejected the session token".to_string(),
        },
        other => ScheduleError::Gateway(other),
    }
}
