pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::*;
pub use services::directory::DoctorDirectory;
pub use services::recommendation::{DiseaseCatalog, RecommendationService};
pub use services::slots::SlotStore;
