// libs/payment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::warn;

use shared_models::error::AppError;

use crate::models::{CallbackPayload, CreateSessionRequest, PaymentError};
use crate::services::session::PaymentService;

#[derive(Clone)]
pub struct PaymentState {
    pub payments: Arc<PaymentService>,
}

#[axum::debug_handler]
pub async fn create_session(
    State(state): State<PaymentState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<Json<Value>, AppError> {
    let handle = state
        .payments
        .create_session(request)
        .await
        .map_err(|e| match e {
            PaymentError::AppointmentCancelledOrNotFound => {
                AppError::NotFound("Appointment cancelled or not found".to_string())
            }
            PaymentError::AlreadyPaid => {
                AppError::Conflict("Appointment already paid".to_string())
            }
            PaymentError::ProviderUnavailable => {
                AppError::ExternalService("Payment provider unreachable".to_string())
            }
            PaymentError::ProviderError(msg) => AppError::ExternalService(msg),
        })?;

    Ok(Json(json!({
        "success": true,
        "handle": handle
    })))
}

/// Always answers success-shaped so providers do not enter retry storms;
/// rejected or stale callbacks are visible in `paymentApplied` and the
/// server logs only.
#[axum::debug_handler]
pub async fn payment_callback(
    State(state): State<PaymentState>,
    Json(payload): Json<CallbackPayload>,
) -> Json<Value> {
    match state.payments.handle_callback(payload).await {
        Ok(application) => Json(json!({
            "success": true,
            "paymentApplied": application.applied,
            "status": application.status,
            "rejection": application.rejection,
        })),
        Err(e) => {
            warn!("Unintelligible payment callback: {}", e);
            Json(json!({
                "success": true,
                "paymentApplied": false,
            }))
        }
    }
}
