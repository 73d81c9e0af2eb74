use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::Router;
use http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use doctor_cell::models::{Address, Doctor, RegisterDoctorRequest};
use doctor_cell::services::directory::DoctorDirectory;
use doctor_cell::services::slots::SlotStore;

use appointment_cell::handlers::AppointmentState;
use appointment_cell::router::appointment_routes;
use appointment_cell::services::booking::BookingService;
use appointment_cell::services::repository::InMemoryAppointmentStore;

async fn test_app() -> (Router, Doctor) {
    let slots = Arc::new(SlotStore::new());
    let directory = Arc::new(DoctorDirectory::new(Arc::clone(&slots)));

    let doctor = directory
        .register(RegisterDoctorRequest {
            name: "Dr. Sharma".to_string(),
            email: "dr.sharma@carebook.test".to_string(),
            specialty: "Pulmonologist".to_string(),
            fee: 500,
            address: Address {
                city: "Kathmandu".to_string(),
                country: "Nepal".to_string(),
            },
        })
        .await;

    let booking = Arc::new(BookingService::new(
        directory,
        slots,
        Arc::new(InMemoryAppointmentStore::new()),
    ));

    let app = Router::new().nest("/appointments", appointment_routes(AppointmentState { booking }));
    (app, doctor)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

fn booking_body(doctor_id: Uuid, user_id: Uuid) -> Value {
    json!({
        "userId": user_id,
        "doctorId": doctor_id,
        "slotDate": "2024-01-01",
        "slotTime": "10:00 AM",
        "patientName": "Asha Thapa",
        "patientEmail": "asha@carebook.test"
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be json")
}

#[tokio::test]
async fn test_book_returns_created_with_id() {
    let (app, doctor) = test_app().await;

    let response = app
        .oneshot(post_json("/appointments", booking_body(doctor.id, Uuid::new_v4())))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert!(body["appointmentId"].is_string());
}

#[tokio::test]
async fn test_double_book_returns_conflict() {
    let (app, doctor) = test_app().await;

    let first = app
        .clone()
        .oneshot(post_json("/appointments", booking_body(doctor.id, Uuid::new_v4())))
        .await
        .expect("request should succeed");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(post_json("/appointments", booking_body(doctor.id, Uuid::new_v4())))
        .await
        .expect("request should succeed");
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body = body_json(second).await;
    assert_eq!(body["error"], json!("Slot not available"));
}

#[tokio::test]
async fn test_book_unknown_doctor_returns_not_found() {
    let (app, _doctor) = test_app().await;

    let response = app
        .oneshot(post_json(
            "/appointments",
            booking_body(Uuid::new_v4(), Uuid::new_v4()),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancel_by_stranger_returns_forbidden() {
    let (app, doctor) = test_app().await;
    let owner = Uuid::new_v4();

    let created = app
        .clone()
        .oneshot(post_json("/appointments", booking_body(doctor.id, owner)))
        .await
        .expect("request should succeed");
    let appointment_id = body_json(created).await["appointmentId"]
        .as_str()
        .expect("id in body")
        .to_string();

    let response = app
        .oneshot(post_json(
            &format!("/appointments/{}/cancel", appointment_id),
            json!({ "userId": Uuid::new_v4() }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_cancel_by_owner_succeeds() {
    let (app, doctor) = test_app().await;
    let owner = Uuid::new_v4();

    let created = app
        .clone()
        .oneshot(post_json("/appointments", booking_body(doctor.id, owner)))
        .await
        .expect("request should succeed");
    let appointment_id = body_json(created).await["appointmentId"]
        .as_str()
        .expect("id in body")
        .to_string();

    let response = app
        .oneshot(post_json(
            &format!("/appointments/{}/cancel", appointment_id),
            json!({ "userId": owner }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["cancelled"], json!(true));
}

#[tokio::test]
async fn test_book_with_minimal_body() {
    let (app, doctor) = test_app().await;

    let response = app
        .oneshot(post_json(
            "/appointments",
            json!({
                "userId": Uuid::new_v4(),
                "doctorId": doctor.id,
                "slotDate": "2024-01-01",
                "slotTime": "10:00 AM"
            }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_cancel_by_doctor_over_http() {
    let (app, doctor) = test_app().await;

    let created = app
        .clone()
        .oneshot(post_json("/appointments", booking_body(doctor.id, Uuid::new_v4())))
        .await
        .expect("request should succeed");
    let appointment_id = body_json(created).await["appointmentId"]
        .as_str()
        .expect("id in body")
        .to_string();

    let forbidden = app
        .clone()
        .oneshot(post_json(
            &format!("/appointments/{}/cancel-by-doctor", appointment_id),
            json!({ "doctorId": Uuid::new_v4() }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(post_json(
            &format!("/appointments/{}/cancel-by-doctor", appointment_id),
            json!({ "doctorId": doctor.id }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["cancelled"], json!(true));
}

#[tokio::test]
async fn test_complete_by_other_doctor_returns_forbidden() {
    let (app, doctor) = test_app().await;

    let created = app
        .clone()
        .oneshot(post_json("/appointments", booking_body(doctor.id, Uuid::new_v4())))
        .await
        .expect("request should succeed");
    let appointment_id = body_json(created).await["appointmentId"]
        .as_str()
        .expect("id in body")
        .to_string();

    let response = app
        .oneshot(post_json(
            &format!("/appointments/{}/complete", appointment_id),
            json!({ "doctorId": Uuid::new_v4() }),
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unavailable_doctor_returns_unprocessable() {
    let slots = Arc::new(SlotStore::new());
    let directory = Arc::new(DoctorDirectory::new(Arc::clone(&slots)));
    let doctor = directory
        .register(RegisterDoctorRequest {
            name: "Dr. Rai".to_string(),
            email: "dr.rai@carebook.test".to_string(),
            specialty: "Dermatologist".to_string(),
            fee: 450,
            address: Address {
                city: "Pokhara".to_string(),
                country: "Nepal".to_string(),
            },
        })
        .await;
    directory
        .set_availability(doctor.id, false)
        .await
        .expect("doctor exists");

    let booking = Arc::new(BookingService::new(
        directory,
        slots,
        Arc::new(InMemoryAppointmentStore::new()),
    ));
    let app = Router::new().nest("/appointments", appointment_routes(AppointmentState { booking }));

    let response = app
        .oneshot(post_json("/appointments", booking_body(doctor.id, Uuid::new_v4())))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_get_appointment_by_id() {
    let (app, doctor) = test_app().await;

    let created = app
        .clone()
        .oneshot(post_json("/appointments", booking_body(doctor.id, Uuid::new_v4())))
        .await
        .expect("request should succeed");
    let appointment_id = body_json(created).await["appointmentId"]
        .as_str()
        .expect("id in body")
        .to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/appointments/{}", appointment_id))
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["appointment"]["amount"], json!(500));

    let missing = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/appointments/{}", Uuid::new_v4()))
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_user_appointments() {
    let (app, doctor) = test_app().await;
    let user_id = Uuid::new_v4();

    app.clone()
        .oneshot(post_json("/appointments", booking_body(doctor.id, user_id)))
        .await
        .expect("request should succeed");

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/appointments/users/{}", user_id))
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let appointments = body["appointments"].as_array().expect("array of appointments");
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0]["payment_status"], json!("unpaid"));
}
