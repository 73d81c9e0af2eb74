// libs/payment-cell/src/services/session.rs
use std::sync::Arc;
use tracing::info;

use shared_config::AppConfig;

use appointment_cell::services::repository::AppointmentRepository;

use crate::models::{
    CallbackPayload, CreateSessionRequest, GatewayKind, PaymentApplication, PaymentError,
    ProviderHandle,
};
use crate::services::gateway::{
    PaymentGateway, RedirectSessionGateway, TokenVerificationGateway,
};
use crate::services::reconciler::PaymentReconciler;

/// Front door of the payment cell: owns one gateway per provider variant
/// and the reconciler that applies their outcomes.
pub struct PaymentService {
    redirect: RedirectSessionGateway,
    token: TokenVerificationGateway,
    reconciler: PaymentReconciler,
}

impl PaymentService {
    pub fn new(
        config: &AppConfig,
        repository: Arc<dyn AppointmentRepository>,
    ) -> Result<Self, PaymentError> {
        Ok(Self {
            redirect: RedirectSessionGateway::new(config),
            token: TokenVerificationGateway::new(config)?,
            reconciler: PaymentReconciler::new(repository),
        })
    }

    pub async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<ProviderHandle, PaymentError> {
        let appointment = self.reconciler.guard_initiation(request.appointment_id).await?;

        let gateway: &dyn PaymentGateway = match request.provider {
            GatewayKind::RedirectSession => &self.redirect,
            GatewayKind::TokenVerification => &self.token,
        };

        let handle = gateway.initiate(&appointment).await?;
        self.reconciler.mark_pending(request.appointment_id).await;

        info!(
            "Payment session created for appointment {} via {:?}",
            request.appointment_id, request.provider
        );
        Ok(handle)
    }

    /// Interpret and apply a provider callback. Interpretation errors are
    /// the only hard failures; application results always come back.
    pub async fn handle_callback(
        &self,
        payload: CallbackPayload,
    ) -> Result<PaymentApplication, PaymentError> {
        let gateway: &dyn PaymentGateway = match &payload {
            CallbackPayload::RedirectSession { .. } => &self.redirect,
            CallbackPayload::TokenVerification { .. } => &self.token,
        };

        let outcome = gateway.interpret_callback(&payload)?;
        Ok(self.reconciler.apply(outcome).await)
    }
}
