// libs/payment-cell/src/router.rs
use axum::{routing::post, Router};

use crate::handlers::{self, PaymentState};

pub fn payment_routes(state: PaymentState) -> Router {
    Router::new()
        .route("/session", post(handlers::create_session))
        .route("/callback", post(handlers::payment_callback))
        .with_state(state)
}
