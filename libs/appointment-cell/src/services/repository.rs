// libs/appointment-cell/src/services/repository.rs
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::Appointment;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    #[error("Appointment {0} already exists")]
    Duplicate(Uuid),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Persistence seam for appointments. Records are never deleted;
/// cancellation and completion are soft flags on the record.
///
/// `record` hands out a per-appointment lock so that callers (the
/// coordinator for cancel/complete, the payment reconciler for status
/// transitions) serialize their writes per record without any lock that
/// spans unrelated appointments.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn insert(&self, appointment: Appointment) -> Result<(), RepositoryError>;

    async fn record(&self, id: Uuid) -> Option<Arc<RwLock<Appointment>>>;

    async fn fetch(&self, id: Uuid) -> Option<Appointment>;

    async fn list_for_user(&self, user_id: Uuid) -> Vec<Appointment>;

    async fn list_for_doctor(&self, doctor_id: Uuid) -> Vec<Appointment>;
}

pub struct InMemoryAppointmentStore {
    appointments: RwLock<HashMap<Uuid, Arc<RwLock<Appointment>>>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self {
            appointments: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryAppointmentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentStore {
    async fn insert(&self, appointment: Appointment) -> Result<(), RepositoryError> {
        let mut appointments = self.appointments.write().await;
        if appointments.contains_key(&appointment.id) {
            return Err(RepositoryError::Duplicate(appointment.id));
        }

        debug!("Appointment {} persisted", appointment.id);
        appointments.insert(appointment.id, Arc::new(RwLock::new(appointment)));
        Ok(())
    }

    async fn record(&self, id: Uuid) -> Option<Arc<RwLock<Appointment>>> {
        let appointments = self.appointments.read().await;
        appointments.get(&id).cloned()
    }

    async fn fetch(&self, id: Uuid) -> Option<Appointment> {
        let record = self.record(id).await?;
        let appointment = record.read().await;
        Some(appointment.clone())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Vec<Appointment> {
        let records: Vec<Arc<RwLock<Appointment>>> = {
            let appointments = self.appointments.read().await;
            appointments.values().cloned().collect()
        };

        let mut matches = Vec::new();
        for record in records {
            let appointment = record.read().await;
            if appointment.user_id == user_id {
                matches.push(appointment.clone());
            }
        }
        matches.sort_by_key(|a| a.created_at);
        matches
    }

    async fn list_for_doctor(&self, doctor_id: Uuid) -> Vec<Appointment> {
        let records: Vec<Arc<RwLock<Appointment>>> = {
            let appointments = self.appointments.read().await;
            appointments.values().cloned().collect()
        };

        let mut matches = Vec::new();
        for record in records {
            let appointment = record.read().await;
            if appointment.doctor_id == doctor_id {
                matches.push(appointment.clone());
            }
        }
        matches.sort_by_key(|a| a.created_at);
        matches
    }
}
