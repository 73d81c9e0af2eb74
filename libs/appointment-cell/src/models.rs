// libs/appointment-cell/src/models.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use doctor_cell::models::{Address, Doctor};

/// Identity of the patient frozen at booking time. Patient accounts are
/// managed elsewhere; this is an audit snapshot, never re-synced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSnapshot {
    pub name: String,
    pub email: String,
}

/// Doctor data frozen at booking time, including the fee the patient agreed
/// to. Later fee or address changes do not touch existing appointments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSnapshot {
    pub name: String,
    pub specialty: String,
    pub fee: u32,
    pub address: Address,
}

impl From<&Doctor> for DoctorSnapshot {
    fn from(doctor: &Doctor) -> Self {
        Self {
            name: doctor.name.clone(),
            specialty: doctor.specialty.clone(),
            fee: doctor.fee,
            address: doctor.address.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    PendingAtProvider,
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Unpaid => write!(f, "unpaid"),
            PaymentStatus::PendingAtProvider => write!(f, "pending_at_provider"),
            PaymentStatus::Paid => write!(f, "paid"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub doctor_id: Uuid,
    pub patient: PatientSnapshot,
    pub doctor: DoctorSnapshot,
    pub slot_date: NaiveDate,
    pub slot_time: String,
    pub amount: u32,
    pub cancelled: bool,
    pub is_completed: bool,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub user_id: Uuid,
    pub doctor_id: Uuid,
    pub slot_date: NaiveDate,
    pub slot_time: String,
    // Patient identity lives in an external user store; these travel with
    // the booking request only when the caller has them.
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub patient_email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAppointmentRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteAppointmentRequest {
    pub doctor_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelByDoctorRequest {
    pub doctor_id: Uuid,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum BookingError {
    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Doctor not available")]
    DoctorUnavailable,

    #[error("Slot not available")]
    SlotTaken,

    #[error("Appointment not found")]
    NotFound,

    #[error("Unauthorized action")]
    Unauthorized,

    #[error("Storage error: {0}")]
    Storage(String),
}
