// libs/doctor-cell/src/services/directory.rs
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{BookingProfile, Doctor, DoctorError, DoctorSummary, RegisterDoctorRequest};
use crate::services::slots::SlotStore;

/// Read-mostly store of doctor records. Slot occupancy lives in the
/// [`SlotStore`]; the directory only composes a snapshot of it into the
/// booking profile handed to the reservation coordinator.
pub struct DoctorDirectory {
    doctors: RwLock<HashMap<Uuid, Doctor>>,
    slots: Arc<SlotStore>,
}

impl DoctorDirectory {
    pub fn new(slots: Arc<SlotStore>) -> Self {
        Self {
            doctors: RwLock::new(HashMap::new()),
            slots,
        }
    }

    pub fn slots(&self) -> &Arc<SlotStore> {
        &self.slots
    }

    /// Seed a doctor record. Account management is an external concern;
    /// this exists for the seeding process and tests.
    pub async fn register(&self, request: RegisterDoctorRequest) -> Doctor {
        let doctor = Doctor {
            id: Uuid::new_v4(),
            name: request.name,
            email: request.email,
            specialty: request.specialty,
            fee: request.fee,
            available: true,
            address: request.address,
            joined_at: Utc::now(),
        };

        let mut doctors = self.doctors.write().await;
        doctors.insert(doctor.id, doctor.clone());
        info!("Doctor {} registered with specialty {}", doctor.id, doctor.specialty);
        doctor
    }

    pub async fn get(&self, doctor_id: Uuid) -> Result<Doctor, DoctorError> {
        let doctors = self.doctors.read().await;
        doctors.get(&doctor_id).cloned().ok_or(DoctorError::NotFound)
    }

    /// Fee, availability gate and occupancy snapshot for a booking attempt.
    pub async fn get_available(&self, doctor_id: Uuid) -> Result<BookingProfile, DoctorError> {
        let doctor = self.get(doctor_id).await?;
        let occupancy = self.slots.snapshot(doctor_id).await;

        Ok(BookingProfile {
            fee: doctor.fee,
            available: doctor.available,
            doctor,
            occupancy,
        })
    }

    /// Case-insensitive exact match on specialty and, when given, on the
    /// address city. An empty result is not an error here; the caller
    /// decides what empty means.
    pub async fn list_by_specialty(
        &self,
        specialty: &str,
        city: Option<&str>,
    ) -> Vec<DoctorSummary> {
        let doctors = self.doctors.read().await;

        let mut matches: Vec<DoctorSummary> = doctors
            .values()
            .filter(|d| d.specialty.eq_ignore_ascii_case(specialty))
            .filter(|d| match city {
                Some(city) => d.address.city.eq_ignore_ascii_case(city),
                None => true,
            })
            .map(DoctorSummary::from)
            .collect();

        matches.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Specialty {} matched {} doctors", specialty, matches.len());
        matches
    }

    pub async fn list(&self) -> Vec<DoctorSummary> {
        let doctors = self.doctors.read().await;
        let mut summaries: Vec<DoctorSummary> = doctors.values().map(DoctorSummary::from).collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }

    /// Gate flag for new reservations; existing appointments are untouched.
    pub async fn set_availability(
        &self,
        doctor_id: Uuid,
        available: bool,
    ) -> Result<Doctor, DoctorError> {
        let mut doctors = self.doctors.write().await;
        let doctor = doctors.get_mut(&doctor_id).ok_or(DoctorError::NotFound)?;
        doctor.available = available;
        info!("Doctor {} availability set to {}", doctor_id, available);
        Ok(doctor.clone())
    }
}
