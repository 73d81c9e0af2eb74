use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::handlers::AppointmentState;
use appointment_cell::router::appointment_routes;
use appointment_cell::services::booking::BookingService;
use doctor_cell::handlers::DoctorState;
use doctor_cell::router::doctor_routes;
use doctor_cell::services::directory::DoctorDirectory;
use doctor_cell::services::recommendation::RecommendationService;
use payment_cell::handlers::PaymentState;
use payment_cell::router::payment_routes;
use payment_cell::services::session::PaymentService;

pub fn create_router(
    directory: Arc<DoctorDirectory>,
    recommendation: Arc<RecommendationService>,
    booking: Arc<BookingService>,
    payments: Arc<PaymentService>,
) -> Router {
    Router::new()
        .route("/", get(|| async { "Carebook API is running!" }))
        .nest(
            "/doctors",
            doctor_routes(DoctorState {
                directory,
                recommendation,
            }),
        )
        .nest("/appointments", appointment_routes(AppointmentState { booking }))
        .nest("/payments", payment_routes(PaymentState { payments }))
}
