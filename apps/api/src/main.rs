use std::net::SocketAddr;
use std::sync::Arc;

use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use appointment_cell::services::booking::BookingService;
use appointment_cell::services::repository::{AppointmentRepository, InMemoryAppointmentStore};
use doctor_cell::services::directory::DoctorDirectory;
use doctor_cell::services::recommendation::{DiseaseCatalog, RecommendationService};
use doctor_cell::services::slots::SlotStore;
use payment_cell::services::session::PaymentService;
use shared_config::AppConfig;

#[tokio::main]
async fn main() {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Carebook API server");

    let config = AppConfig::from_env();

    // Shared in-process state
    let slots = Arc::new(SlotStore::new());
    let directory = Arc::new(DoctorDirectory::new(Arc::clone(&slots)));
    let catalog = Arc::new(DiseaseCatalog::new());
    let repository: Arc<dyn AppointmentRepository> = Arc::new(InMemoryAppointmentStore::new());

    let booking = Arc::new(BookingService::new(
        Arc::clone(&directory),
        Arc::clone(&slots),
        Arc::clone(&repository),
    ));
    let recommendation = Arc::new(RecommendationService::new(
        Arc::clone(&catalog),
        Arc::clone(&directory),
    ));
    let payments = Arc::new(
        PaymentService::new(&config, Arc::clone(&repository))
            .expect("payment gateway initialization failed"),
    );

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the application router
    let app = router::create_router(directory, recommendation, booking, payments)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
