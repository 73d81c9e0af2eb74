use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use uuid::Uuid;

use doctor_cell::models::SlotError;
use doctor_cell::services::slots::SlotStore;

fn slot_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
}

#[tokio::test]
async fn test_reserve_then_conflict() {
    let store = SlotStore::new();
    let doctor_id = Uuid::new_v4();

    store
        .reserve(doctor_id, slot_date(), "10:00 AM")
        .await
        .expect("first reserve should succeed");

    let second = store.reserve(doctor_id, slot_date(), "10:00 AM").await;
    assert_matches!(second, Err(SlotError::Conflict));

    // A different time label on the same date is unaffected
    store
        .reserve(doctor_id, slot_date(), "10:30 AM")
        .await
        .expect("different time should succeed");
}

#[tokio::test]
async fn test_concurrent_reserve_single_winner() {
    let store = Arc::new(SlotStore::new());
    let doctor_id = Uuid::new_v4();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.reserve(doctor_id, slot_date(), "10:00 AM").await
        }));
    }

    let mut winners = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.expect("task should not panic") {
            Ok(()) => winners += 1,
            Err(SlotError::Conflict) => conflicts += 1,
        }
    }

    assert_eq!(winners, 1, "exactly one concurrent reserve must win");
    assert_eq!(conflicts, 15);
    assert!(store.is_booked(doctor_id, slot_date(), "10:00 AM").await);
}

#[tokio::test]
async fn test_release_is_idempotent() {
    let store = SlotStore::new();
    let doctor_id = Uuid::new_v4();

    // Releasing a never-reserved key is a no-op
    store.release(doctor_id, slot_date(), "10:00 AM").await;
    assert!(!store.is_booked(doctor_id, slot_date(), "10:00 AM").await);

    store
        .reserve(doctor_id, slot_date(), "10:00 AM")
        .await
        .expect("reserve should succeed");

    store.release(doctor_id, slot_date(), "10:00 AM").await;
    store.release(doctor_id, slot_date(), "10:00 AM").await;
    assert!(!store.is_booked(doctor_id, slot_date(), "10:00 AM").await);
}

#[tokio::test]
async fn test_reserve_after_release() {
    let store = SlotStore::new();
    let doctor_id = Uuid::new_v4();

    store
        .reserve(doctor_id, slot_date(), "10:00 AM")
        .await
        .expect("reserve should succeed");
    store.release(doctor_id, slot_date(), "10:00 AM").await;

    store
        .reserve(doctor_id, slot_date(), "10:00 AM")
        .await
        .expect("released slot should be bookable again");
}

#[tokio::test]
async fn test_snapshot_reflects_occupancy() {
    let store = SlotStore::new();
    let doctor_id = Uuid::new_v4();
    let other_doctor = Uuid::new_v4();

    store
        .reserve(doctor_id, slot_date(), "10:00 AM")
        .await
        .expect("reserve should succeed");
    store
        .reserve(doctor_id, slot_date(), "11:00 AM")
        .await
        .expect("reserve should succeed");

    let snapshot = store.snapshot(doctor_id).await;
    let times = snapshot.get(&slot_date()).expect("date should be present");
    assert_eq!(times.len(), 2);
    assert!(times.contains("10:00 AM"));
    assert!(times.contains("11:00 AM"));

    // Doctors do not share occupancy
    assert!(store.snapshot(other_doctor).await.is_empty());
}
