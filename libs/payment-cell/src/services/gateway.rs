// libs/payment-cell/src/services/gateway.rs
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error};

use shared_config::AppConfig;

use appointment_cell::models::Appointment;

use crate::models::{
    CallbackPayload, GatewayKind, OutcomeKind, PaymentError, PaymentOutcome, ProviderHandle,
};

/// The token-verification provider reports this literal when a purchase
/// went through; every other status string means the payment did not
/// complete.
const TOKEN_PROVIDER_PAID_STATUS: &str = "Completed";

/// Capability interface over external payment providers. `initiate`
/// obtains a provider-side reference for an appointment; the callback
/// interpreter maps the provider's payload into a common outcome.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    fn kind(&self) -> GatewayKind;

    async fn initiate(&self, appointment: &Appointment) -> Result<ProviderHandle, PaymentError>;

    fn interpret_callback(&self, payload: &CallbackPayload) -> Result<PaymentOutcome, PaymentError>;
}

/// Redirect-session style: the handle is a checkout URL embedding the
/// success/cancel return URLs and the appointment id. The provider later
/// redirects the browser back with a bare success flag, which is trusted
/// as-is (no server-side verification round trip in this flow).
pub struct RedirectSessionGateway {
    checkout_base_url: String,
    frontend_origin: String,
    currency: String,
}

impl RedirectSessionGateway {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            checkout_base_url: config.checkout_base_url.clone(),
            frontend_origin: config.frontend_origin.clone(),
            currency: config.currency.clone(),
        }
    }
}

#[async_trait]
impl PaymentGateway for RedirectSessionGateway {
    fn kind(&self) -> GatewayKind {
        GatewayKind::RedirectSession
    }

    async fn initiate(&self, appointment: &Appointment) -> Result<ProviderHandle, PaymentError> {
        let success_url = format!(
            "{}/verify?success=true&appointmentId={}",
            self.frontend_origin, appointment.id
        );
        let cancel_url = format!(
            "{}/verify?success=false&appointmentId={}",
            self.frontend_origin, appointment.id
        );

        let url = format!(
            "{}/checkout/session?amount={}&currency={}&success_url={}&cancel_url={}",
            self.checkout_base_url,
            appointment.amount as u64 * 100,
            self.currency,
            urlencoding::encode(&success_url),
            urlencoding::encode(&cancel_url),
        );

        debug!("Created checkout session for appointment {}", appointment.id);
        Ok(ProviderHandle::RedirectUrl { url })
    }

    fn interpret_callback(&self, payload: &CallbackPayload) -> Result<PaymentOutcome, PaymentError> {
        match payload {
            CallbackPayload::RedirectSession {
                appointment_id,
                success,
            } => Ok(PaymentOutcome {
                appointment_id: *appointment_id,
                result: if *success {
                    OutcomeKind::Paid
                } else {
                    OutcomeKind::NotPaid
                },
            }),
            _ => Err(PaymentError::ProviderError(
                "Callback payload does not belong to the redirect-session provider".to_string(),
            )),
        }
    }
}

/// Token-verification style: `initiate` registers a purchase order with
/// the wallet API over HTTP; the callback relays the provider's status
/// string together with the purchase-order id.
pub struct TokenVerificationGateway {
    client: reqwest::Client,
    wallet_api_url: String,
    wallet_secret_key: String,
    frontend_origin: String,
}

impl TokenVerificationGateway {
    pub fn new(config: &AppConfig) -> Result<Self, PaymentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider_timeout_secs))
            .build()
            .map_err(|e| PaymentError::ProviderError(e.to_string()))?;

        Ok(Self {
            client,
            wallet_api_url: config.wallet_api_url.clone(),
            wallet_secret_key: config.wallet_secret_key.clone(),
            frontend_origin: config.frontend_origin.clone(),
        })
    }
}

#[async_trait]
impl PaymentGateway for TokenVerificationGateway {
    fn kind(&self) -> GatewayKind {
        GatewayKind::TokenVerification
    }

    async fn initiate(&self, appointment: &Appointment) -> Result<ProviderHandle, PaymentError> {
        // The wallet provider counts in its smallest currency unit.
        let amount = appointment.amount as u64 * 10;

        let payload = json!({
            "return_url": format!("{}/my-appointments", self.frontend_origin),
            "website_url": self.frontend_origin,
            "amount": amount,
            "purchase_order_id": appointment.id,
            "purchase_order_name": "Appointment Payment",
            "customer_info": {
                "name": appointment.patient.name,
                "email": appointment.patient.email,
            },
        });

        let url = format!("{}/epayment/initiate/", self.wallet_api_url);
        debug!("Initiating wallet payment for appointment {}", appointment.id);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("key {}", self.wallet_secret_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("Wallet initiation request failed: {}", e);
                if e.is_timeout() || e.is_connect() {
                    PaymentError::ProviderUnavailable
                } else {
                    PaymentError::ProviderError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Wallet initiation rejected ({}): {}", status, body);
            return Err(PaymentError::ProviderError(format!(
                "Provider returned {}",
                status
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PaymentError::ProviderError(e.to_string()))?;

        let reference = body["pidx"]
            .as_str()
            .ok_or_else(|| PaymentError::ProviderError("Missing pidx in response".to_string()))?
            .to_string();
        let payment_url = body["payment_url"]
            .as_str()
            .ok_or_else(|| {
                PaymentError::ProviderError("Missing payment_url in response".to_string())
            })?
            .to_string();

        Ok(ProviderHandle::PurchaseOrder {
            reference,
            payment_url,
        })
    }

    fn interpret_callback(&self, payload: &CallbackPayload) -> Result<PaymentOutcome, PaymentError> {
        match payload {
            CallbackPayload::TokenVerification {
                purchase_order_id,
                status,
                ..
            } => Ok(PaymentOutcome {
                appointment_id: *purchase_order_id,
                result: if status == TOKEN_PROVIDER_PAID_STATUS {
                    OutcomeKind::Paid
                } else {
                    OutcomeKind::NotPaid
                },
            }),
            _ => Err(PaymentError::ProviderError(
                "Callback payload does not belong to the token-verification provider".to_string(),
            )),
        }
    }
}
