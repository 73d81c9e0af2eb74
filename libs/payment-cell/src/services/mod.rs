pub mod gateway;
pub mod reconciler;
pub mod session;
