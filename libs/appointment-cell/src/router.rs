// libs/appointment-cell/src/router.rs
use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{self, AppointmentState};

pub fn appointment_routes(state: AppointmentState) -> Router {
    Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .route("/{appointment_id}/cancel", post(handlers::cancel_appointment))
        .route(
            "/{appointment_id}/cancel-by-doctor",
            post(handlers::cancel_appointment_by_doctor),
        )
        .route("/{appointment_id}/complete", post(handlers::complete_appointment))
        .route("/users/{user_id}", get(handlers::get_user_appointments))
        .route("/doctors/{doctor_id}", get(handlers::get_doctor_appointments))
        .with_state(state)
}
