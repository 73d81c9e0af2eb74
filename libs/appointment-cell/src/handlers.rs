// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{
    BookAppointmentRequest, BookingError, CancelAppointmentRequest, CancelByDoctorRequest,
    CompleteAppointmentRequest,
};
use crate::services::booking::BookingService;

#[derive(Clone)]
pub struct AppointmentState {
    pub booking: Arc<BookingService>,
}

fn map_booking_error(e: BookingError) -> AppError {
    match e {
        BookingError::DoctorNotFound => AppError::NotFound("Doctor not found".to_string()),
        BookingError::DoctorUnavailable => {
            AppError::Unprocessable("Doctor not available".to_string())
        }
        BookingError::SlotTaken => AppError::Conflict("Slot not available".to_string()),
        BookingError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        BookingError::Unauthorized => AppError::Forbidden("Unauthorized action".to_string()),
        BookingError::Storage(msg) => AppError::Internal(msg),
    }
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<AppointmentState>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let appointment = state
        .booking
        .book_appointment(request)
        .await
        .map_err(map_booking_error)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "appointmentId": appointment.id,
            "message": "Appointment booked"
        })),
    ))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<CancelAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    state
        .booking
        .cancel_appointment(appointment_id, request.user_id)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({
        "success": true,
        "cancelled": true,
        "message": "Appointment cancelled"
    })))
}

#[axum::debug_handler]
pub async fn cancel_appointment_by_doctor(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<CancelByDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    state
        .booking
        .cancel_appointment_by_doctor(appointment_id, request.doctor_id)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({
        "success": true,
        "cancelled": true,
        "message": "Appointment cancelled"
    })))
}

#[axum::debug_handler]
pub async fn complete_appointment(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<CompleteAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    state
        .booking
        .complete_appointment(appointment_id, request.doctor_id)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Appointment completed"
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = state
        .booking
        .get_appointment(appointment_id)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment
    })))
}

#[axum::debug_handler]
pub async fn get_user_appointments(
    State(state): State<AppointmentState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointments = state.booking.appointments_for_user(user_id).await;
    Ok(Json(json!({
        "success": true,
        "appointments": appointments
    })))
}

#[axum::debug_handler]
pub async fn get_doctor_appointments(
    State(state): State<AppointmentState>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointments = state.booking.appointments_for_doctor(doctor_id).await;
    Ok(Json(json!({
        "success": true,
        "appointments": appointments
    })))
}
