// libs/doctor-cell/src/models.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub specialty: String,
    pub fee: u32,
    pub available: bool,
    pub address: Address,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterDoctorRequest {
    pub name: String,
    pub email: String,
    pub specialty: String,
    pub fee: u32,
    pub address: Address,
}

/// Public projection of a doctor: never carries credentials or contact data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub fee: u32,
    pub address: Address,
}

impl From<&Doctor> for DoctorSummary {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id,
            name: doctor.name.clone(),
            specialty: doctor.specialty.clone(),
            fee: doctor.fee,
            address: doctor.address.clone(),
        }
    }
}

/// Everything the reservation coordinator needs to decide on a booking
/// attempt: the fee to freeze into the appointment, the availability gate,
/// and a point-in-time view of the occupancy map.
#[derive(Debug, Clone)]
pub struct BookingProfile {
    pub doctor: Doctor,
    pub fee: u32,
    pub available: bool,
    pub occupancy: HashMap<NaiveDate, BTreeSet<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Disease {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAvailabilityRequest {
    pub available: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendQuery {
    pub disease_name: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum DoctorError {
    #[error("Doctor not found")]
    NotFound,

    #[error("Disease or specialization not found")]
    DiseaseNotFound,

    #[error("No doctors found for the given criteria")]
    NoDoctorsFound,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    #[error("Slot already booked")]
    Conflict,
}
