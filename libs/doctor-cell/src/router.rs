// libs/doctor-cell/src/router.rs
use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{self, DoctorState};

pub fn doctor_routes(state: DoctorState) -> Router {
    Router::new()
        .route("/", get(handlers::list_doctors))
        .route("/recommend", get(handlers::recommend_doctors))
        .route("/{doctor_id}/availability", post(handlers::set_availability))
        .with_state(state)
}
