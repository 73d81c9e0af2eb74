pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::*;
pub use services::gateway::{PaymentGateway, RedirectSessionGateway, TokenVerificationGateway};
pub use services::reconciler::PaymentReconciler;
pub use services::session::PaymentService;
