// libs/payment-cell/src/services/reconciler.rs
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use appointment_cell::models::{Appointment, PaymentStatus};
use appointment_cell::services::repository::AppointmentRepository;

use crate::models::{CallbackRejection, OutcomeKind, PaymentApplication, PaymentError, PaymentOutcome};

/// Drives the per-appointment payment state machine:
///
/// ```text
/// unpaid -> pending_at_provider -> paid        (terminal)
///                               -> unpaid      (retryable)
/// ```
///
/// All transitions run under the appointment's record lock, so callbacks
/// for the same appointment are serialized. Once `paid`, contradicting
/// callbacks are logged and ignored; replays of the same outcome are
/// harmless no-ops.
pub struct PaymentReconciler {
    repository: Arc<dyn AppointmentRepository>,
}

impl PaymentReconciler {
    pub fn new(repository: Arc<dyn AppointmentRepository>) -> Self {
        Self { repository }
    }

    /// Guard before contacting a provider: the appointment must exist,
    /// not be cancelled, and not already be paid.
    pub async fn guard_initiation(&self, appointment_id: Uuid) -> Result<Appointment, PaymentError> {
        let appointment = self
            .repository
            .fetch(appointment_id)
            .await
            .ok_or(PaymentError::AppointmentCancelledOrNotFound)?;

        if appointment.cancelled {
            return Err(PaymentError::AppointmentCancelledOrNotFound);
        }
        if appointment.payment_status == PaymentStatus::Paid {
            return Err(PaymentError::AlreadyPaid);
        }

        Ok(appointment)
    }

    /// Record that a provider session now exists for the appointment.
    /// A cancellation racing the initiation wins: the pending flag is not
    /// written over a cancelled record.
    pub async fn mark_pending(&self, appointment_id: Uuid) {
        let Some(record) = self.repository.record(appointment_id).await else {
            return;
        };

        let mut appointment = record.write().await;
        if !appointment.cancelled && appointment.payment_status == PaymentStatus::Unpaid {
            appointment.payment_status = PaymentStatus::PendingAtProvider;
            debug!("Appointment {} pending at provider", appointment_id);
        }
    }

    /// Apply a provider outcome. Never errors: providers retry callbacks
    /// aggressively, so every rejection is reported in the application
    /// result and logged instead of propagated.
    pub async fn apply(&self, outcome: PaymentOutcome) -> PaymentApplication {
        let Some(record) = self.repository.record(outcome.appointment_id).await else {
            warn!(
                "Payment callback for unknown appointment {} ignored",
                outcome.appointment_id
            );
            return PaymentApplication {
                applied: false,
                status: None,
                rejection: Some(CallbackRejection::UnknownAppointment),
            };
        };

        let mut appointment = record.write().await;

        if appointment.cancelled {
            warn!(
                "Payment callback for cancelled appointment {} rejected",
                outcome.appointment_id
            );
            return PaymentApplication {
                applied: false,
                status: Some(appointment.payment_status),
                rejection: Some(CallbackRejection::AlreadyCancelled),
            };
        }

        match (outcome.result, appointment.payment_status) {
            (OutcomeKind::Paid, PaymentStatus::Paid) => {
                debug!(
                    "Duplicate paid callback for appointment {} re-asserts paid",
                    outcome.appointment_id
                );
                PaymentApplication {
                    applied: false,
                    status: Some(PaymentStatus::Paid),
                    rejection: None,
                }
            }
            (OutcomeKind::Paid, _) => {
                appointment.payment_status = PaymentStatus::Paid;
                info!("Appointment {} marked paid", outcome.appointment_id);
                PaymentApplication {
                    applied: true,
                    status: Some(PaymentStatus::Paid),
                    rejection: None,
                }
            }
            (OutcomeKind::NotPaid, PaymentStatus::Paid) => {
                // Terminal state: a late failure callback cannot regress it.
                warn!(
                    "Stale not-paid callback for paid appointment {} ignored",
                    outcome.appointment_id
                );
                PaymentApplication {
                    applied: false,
                    status: Some(PaymentStatus::Paid),
                    rejection: Some(CallbackRejection::StaleAfterPaid),
                }
            }
            (OutcomeKind::NotPaid, _) => {
                appointment.payment_status = PaymentStatus::Unpaid;
                info!(
                    "Appointment {} payment failed, back to unpaid",
                    outcome.appointment_id
                );
                PaymentApplication {
                    applied: true,
                    status: Some(PaymentStatus::Unpaid),
                    rejection: None,
                }
            }
        }
    }
}
