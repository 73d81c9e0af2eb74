// libs/doctor-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{DoctorError, RecommendQuery, SetAvailabilityRequest};
use crate::services::directory::DoctorDirectory;
use crate::services::recommendation::RecommendationService;

#[derive(Clone)]
pub struct DoctorState {
    pub directory: Arc<DoctorDirectory>,
    pub recommendation: Arc<RecommendationService>,
}

#[axum::debug_handler]
pub async fn list_doctors(State(state): State<DoctorState>) -> Result<Json<Value>, AppError> {
    let doctors = state.directory.list().await;
    Ok(Json(json!({ "success": true, "doctors": doctors })))
}

#[axum::debug_handler]
pub async fn recommend_doctors(
    State(state): State<DoctorState>,
    Query(query): Query<RecommendQuery>,
) -> Result<Json<Value>, AppError> {
    let disease_name = query
        .disease_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest("Disease name is required".to_string()))?;

    let doctors = state
        .recommendation
        .recommend(disease_name, query.location.as_deref())
        .await
        .map_err(|e| match e {
            DoctorError::DiseaseNotFound => {
                AppError::NotFound("Disease or specialization not found".to_string())
            }
            DoctorError::NoDoctorsFound => {
                AppError::NotFound("No doctors found for the given criteria".to_string())
            }
            DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
        })?;

    Ok(Json(json!({ "success": true, "doctors": doctors })))
}

#[axum::debug_handler]
pub async fn set_availability(
    State(state): State<DoctorState>,
    Path(doctor_id): Path<Uuid>,
    Json(request): Json<SetAvailabilityRequest>,
) -> Result<Json<Value>, AppError> {
    let doctor = state
        .directory
        .set_availability(doctor_id, request.available)
        .await
        .map_err(|_| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "available": doctor.available,
        "message": "Availability changed"
    })))
}
