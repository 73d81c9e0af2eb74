use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub checkout_base_url: String,
    pub frontend_origin: String,
    pub wallet_api_url: String,
    pub wallet_secret_key: String,
    pub currency: String,
    pub provider_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            checkout_base_url: env::var("CHECKOUT_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("CHECKOUT_BASE_URL not set, using empty value");
                    String::new()
                }),
            frontend_origin: env::var("FRONTEND_ORIGIN")
                .unwrap_or_else(|_| {
                    warn!("FRONTEND_ORIGIN not set, using default");
                    "http://localhost:5173".to_string()
                }),
            wallet_api_url: env::var("WALLET_API_URL")
                .unwrap_or_else(|_| {
                    warn!("WALLET_API_URL not set, using empty value");
                    String::new()
                }),
            wallet_secret_key: env::var("WALLET_SECRET_KEY")
                .unwrap_or_else(|_| {
                    warn!("WALLET_SECRET_KEY not set, using empty value");
                    String::new()
                }),
            currency: env::var("CURRENCY")
                .unwrap_or_else(|_| {
                    warn!("CURRENCY not set, using default");
                    "npr".to_string()
                })
                .to_lowercase(),
            provider_timeout_secs: env::var("PROVIDER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        };

        if !config.is_configured() {
            warn!("Payment providers not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.checkout_base_url.is_empty()
            && !self.wallet_api_url.is_empty()
            && !self.wallet_secret_key.is_empty()
    }
}
