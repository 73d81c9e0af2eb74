use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use uuid::Uuid;

use doctor_cell::models::{Address, DoctorError, RegisterDoctorRequest};
use doctor_cell::services::directory::DoctorDirectory;
use doctor_cell::services::slots::SlotStore;

fn register_request(name: &str, specialty: &str, city: &str, fee: u32) -> RegisterDoctorRequest {
    RegisterDoctorRequest {
        name: name.to_string(),
        email: format!("{}@carebook.test", name.to_lowercase().replace(' ', ".")),
        specialty: specialty.to_string(),
        fee,
        address: Address {
            city: city.to_string(),
            country: "Nepal".to_string(),
        },
    }
}

fn new_directory() -> Arc<DoctorDirectory> {
    Arc::new(DoctorDirectory::new(Arc::new(SlotStore::new())))
}

#[tokio::test]
async fn test_get_available_unknown_doctor() {
    let directory = new_directory();
    let result = directory.get_available(Uuid::new_v4()).await;
    assert_matches!(result, Err(DoctorError::NotFound));
}

#[tokio::test]
async fn test_get_available_returns_fee_and_occupancy() {
    let directory = new_directory();
    let doctor = directory
        .register(register_request("Dr. Sharma", "Pulmonologist", "Kathmandu", 500))
        .await;

    let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    directory
        .slots()
        .reserve(doctor.id, date, "10:00 AM")
        .await
        .expect("reserve should succeed");

    let profile = directory
        .get_available(doctor.id)
        .await
        .expect("doctor should exist");
    assert_eq!(profile.fee, 500);
    assert!(profile.available);
    assert!(profile.occupancy.get(&date).expect("date present").contains("10:00 AM"));
}

#[tokio::test]
async fn test_list_by_specialty_is_case_insensitive() {
    let directory = new_directory();
    directory
        .register(register_request("Dr. Sharma", "Pulmonologist", "Kathmandu", 500))
        .await;
    directory
        .register(register_request("Dr. Rai", "Pulmonologist", "Pokhara", 600))
        .await;
    directory
        .register(register_request("Dr. Gurung", "Dermatologist", "Kathmandu", 450))
        .await;

    let all = directory.list_by_specialty("pulmonologist", None).await;
    assert_eq!(all.len(), 2);

    let in_city = directory.list_by_specialty("PULMONOLOGIST", Some("kathmandu")).await;
    assert_eq!(in_city.len(), 1);
    assert_eq!(in_city[0].name, "Dr. Sharma");

    // Empty result is a plain empty vec, not an error
    let nowhere = directory.list_by_specialty("Pulmonologist", Some("Nowhere")).await;
    assert!(nowhere.is_empty());
}

#[tokio::test]
async fn test_set_availability_gates_profile() {
    let directory = new_directory();
    let doctor = directory
        .register(register_request("Dr. Sharma", "Pulmonologist", "Kathmandu", 500))
        .await;

    directory
        .set_availability(doctor.id, false)
        .await
        .expect("doctor should exist");

    let profile = directory
        .get_available(doctor.id)
        .await
        .expect("doctor should exist");
    assert!(!profile.available);

    let missing = directory.set_availability(Uuid::new_v4(), true).await;
    assert_matches!(missing, Err(DoctorError::NotFound));
}

#[tokio::test]
async fn test_list_never_exposes_credentials() {
    let directory = new_directory();
    directory
        .register(register_request("Dr. Sharma", "Pulmonologist", "Kathmandu", 500))
        .await;

    let doctors = directory.list().await;
    assert_eq!(doctors.len(), 1);

    let serialized = serde_json::to_value(&doctors).expect("serializable");
    assert!(serialized[0].get("email").is_none());
}
