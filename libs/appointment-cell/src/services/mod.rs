pub mod booking;
pub mod repository;
