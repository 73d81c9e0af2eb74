// libs/payment-cell/src/models.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use appointment_cell::models::PaymentStatus;

/// The two provider integration styles. New providers add a variant and a
/// gateway implementation; the calling code does not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayKind {
    RedirectSession,
    TokenVerification,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub appointment_id: Uuid,
    pub provider: GatewayKind,
}

/// Opaque reference handed back to the client after payment initiation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProviderHandle {
    RedirectUrl { url: String },
    PurchaseOrder { reference: String, payment_url: String },
}

/// Provider callback payloads, tagged by the provider variant that sent
/// them. The redirect style reports a bare success flag; the token style
/// relays the provider's status string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum CallbackPayload {
    #[serde(rename_all = "camelCase")]
    RedirectSession { appointment_id: Uuid, success: bool },
    TokenVerification {
        purchase_order_id: Uuid,
        status: String,
        #[serde(default)]
        pidx: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Paid,
    NotPaid,
}

/// A provider callback translated into the common vocabulary the
/// reconciler understands.
#[derive(Debug, Clone, Copy)]
pub struct PaymentOutcome {
    pub appointment_id: Uuid,
    pub result: OutcomeKind,
}

/// Why a callback was not applied. Rejections are reported to the caller
/// and logged, never surfaced as errors: providers retry on anything that
/// does not look like success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallbackRejection {
    AlreadyCancelled,
    StaleAfterPaid,
    UnknownAppointment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentApplication {
    pub applied: bool,
    pub status: Option<PaymentStatus>,
    pub rejection: Option<CallbackRejection>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PaymentError {
    #[error("Appointment cancelled or not found")]
    AppointmentCancelledOrNotFound,

    #[error("Appointment already paid")]
    AlreadyPaid,

    #[error("Payment provider unreachable")]
    ProviderUnavailable,

    #[error("Provider error: {0}")]
    ProviderError(String),
}
