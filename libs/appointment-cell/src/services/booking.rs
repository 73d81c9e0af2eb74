// libs/appointment-cell/src/services/booking.rs
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use doctor_cell::services::directory::DoctorDirectory;
use doctor_cell::services::slots::SlotStore;

use crate::models::{
    Appointment, BookAppointmentRequest, BookingError, DoctorSnapshot, PatientSnapshot,
    PaymentStatus,
};
use crate::services::repository::AppointmentRepository;

/// Orchestrates "doctor available? -> slot free? -> reserve -> persist"
/// as one logical booking attempt. The slot reservation itself is the
/// atomic step; everything after it either completes or is compensated.
pub struct BookingService {
    directory: Arc<DoctorDirectory>,
    slots: Arc<SlotStore>,
    repository: Arc<dyn AppointmentRepository>,
}

impl BookingService {
    pub fn new(
        directory: Arc<DoctorDirectory>,
        slots: Arc<SlotStore>,
        repository: Arc<dyn AppointmentRepository>,
    ) -> Self {
        Self {
            directory,
            slots,
            repository,
        }
    }

    pub async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, BookingError> {
        let profile = self
            .directory
            .get_available(request.doctor_id)
            .await
            .map_err(|_| BookingError::DoctorNotFound)?;

        if !profile.available {
            return Err(BookingError::DoctorUnavailable);
        }

        self.slots
            .reserve(request.doctor_id, request.slot_date, &request.slot_time)
            .await
            .map_err(|_| BookingError::SlotTaken)?;

        let appointment = Appointment {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            doctor_id: request.doctor_id,
            patient: PatientSnapshot {
                name: request.patient_name,
                email: request.patient_email,
            },
            doctor: DoctorSnapshot::from(&profile.doctor),
            slot_date: request.slot_date,
            slot_time: request.slot_time.clone(),
            amount: profile.fee,
            cancelled: false,
            is_completed: false,
            payment_status: PaymentStatus::Unpaid,
            created_at: Utc::now(),
        };

        // The slot is already reserved; if the record cannot be persisted
        // the reservation must be undone or the slot is stranded forever.
        if let Err(e) = self.repository.insert(appointment.clone()).await {
            warn!(
                "Appointment persistence failed for doctor {}, releasing slot {} {}: {}",
                request.doctor_id, request.slot_date, request.slot_time, e
            );
            self.slots
                .release(request.doctor_id, request.slot_date, &request.slot_time)
                .await;
            return Err(BookingError::Storage(e.to_string()));
        }

        info!(
            "Appointment {} booked for doctor {} at {} {}",
            appointment.id, request.doctor_id, request.slot_date, request.slot_time
        );
        Ok(appointment)
    }

    /// Cancelling twice is a success no-op. The cancelled flag is written
    /// before the slot release so a racing booker can never observe a free
    /// slot backed by a live appointment.
    pub async fn cancel_appointment(
        &self,
        appointment_id: Uuid,
        user_id: Uuid,
    ) -> Result<Appointment, BookingError> {
        let record = self
            .repository
            .record(appointment_id)
            .await
            .ok_or(BookingError::NotFound)?;

        let (snapshot, release) = {
            let mut appointment = record.write().await;

            if appointment.user_id != user_id {
                return Err(BookingError::Unauthorized);
            }

            if appointment.cancelled {
                return Ok(appointment.clone());
            }

            appointment.cancelled = true;
            (
                appointment.clone(),
                (
                    appointment.doctor_id,
                    appointment.slot_date,
                    appointment.slot_time.clone(),
                ),
            )
        };

        let (doctor_id, slot_date, slot_time) = release;
        self.slots.release(doctor_id, slot_date, &slot_time).await;

        info!("Appointment {} cancelled by user {}", appointment_id, user_id);
        Ok(snapshot)
    }

    /// Doctor-side cancellation, guarded by the doctor's identity the same
    /// way completion is. Releases the slot like a patient cancel so the
    /// time can be offered again.
    pub async fn cancel_appointment_by_doctor(
        &self,
        appointment_id: Uuid,
        doctor_id: Uuid,
    ) -> Result<Appointment, BookingError> {
        let record = self
            .repository
            .record(appointment_id)
            .await
            .ok_or(BookingError::NotFound)?;

        let (snapshot, release) = {
            let mut appointment = record.write().await;

            if appointment.doctor_id != doctor_id {
                return Err(BookingError::Unauthorized);
            }

            if appointment.cancelled {
                return Ok(appointment.clone());
            }

            appointment.cancelled = true;
            (
                appointment.clone(),
                (
                    appointment.doctor_id,
                    appointment.slot_date,
                    appointment.slot_time.clone(),
                ),
            )
        };

        let (doctor_id, slot_date, slot_time) = release;
        self.slots.release(doctor_id, slot_date, &slot_time).await;

        info!(
            "Appointment {} cancelled by doctor {}",
            appointment_id, doctor_id
        );
        Ok(snapshot)
    }

    /// Doctor-side completion flag. Idempotent, no slot-store effect.
    pub async fn complete_appointment(
        &self,
        appointment_id: Uuid,
        doctor_id: Uuid,
    ) -> Result<Appointment, BookingError> {
        let record = self
            .repository
            .record(appointment_id)
            .await
            .ok_or(BookingError::NotFound)?;

        let mut appointment = record.write().await;

        if appointment.doctor_id != doctor_id {
            return Err(BookingError::Unauthorized);
        }

        if !appointment.is_completed {
            appointment.is_completed = true;
            info!("Appointment {} marked completed", appointment_id);
        }

        Ok(appointment.clone())
    }

    pub async fn get_appointment(&self, appointment_id: Uuid) -> Result<Appointment, BookingError> {
        self.repository
            .fetch(appointment_id)
            .await
            .ok_or(BookingError::NotFound)
    }

    pub async fn appointments_for_user(&self, user_id: Uuid) -> Vec<Appointment> {
        self.repository.list_for_user(user_id).await
    }

    pub async fn appointments_for_doctor(&self, doctor_id: Uuid) -> Vec<Appointment> {
        self.repository.list_for_doctor(doctor_id).await
    }
}
