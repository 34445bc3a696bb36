//! Submission client tests against an in-process stub of the lead service.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, post_json, spawn_submission_stub, unreachable_base_url,
    StubBehaviour,
};
use serde_json::json;
use showroom::clients::SubmissionClient;
use showroom::dto::enquiry_dto::VehicleSummary;
use showroom::models::enquiry::{ContactRequest, PreferredContact, VehicleEnquiryRequest};
use showroom::repositories::vehicle_repository::VehicleRepository;
use showroom::utils::errors::AppError;

fn contact() -> ContactRequest {
    ContactRequest {
        name: "Ama Mensah".to_string(),
        email: "ama@example.com".to_string(),
        phone: Some("+233 24 123 4567".to_string()),
        subject: "Fleet hire".to_string(),
        message: "We need three buses for a wedding in Kumasi.".to_string(),
    }
}

fn enquiry() -> VehicleEnquiryRequest {
    VehicleEnquiryRequest {
        vehicle_id: "2".to_string(),
        name: "Kofi Asante".to_string(),
        email: "kofi@example.com".to_string(),
        phone: "0201234567".to_string(),
        message: Some("Is the E-Class still available?".to_string()),
        preferred_contact: PreferredContact::WhatsApp,
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_contact_is_accepted_with_receipt() {
    let (base_url, received) = spawn_submission_stub(StubBehaviour::Accept).await;
    let client = SubmissionClient::new(base_url, Duration::from_secs(2)).unwrap();

    let receipt = client.submit_contact(&contact()).await.unwrap();
    assert_eq!(receipt.reference, "LEAD-0001");

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    let (path, envelope) = &received[0];
    assert_eq!(path, "contact");
    assert_eq!(envelope["form"], "contact");
    assert!(envelope.get("vehicle").is_none());
    assert_eq!(envelope["data"]["email"], "ama@example.com");
}

#[tokio::test]
async fn test_enquiry_carries_vehicle_summary() {
    let (base_url, received) = spawn_submission_stub(StubBehaviour::Accept).await;
    let client = SubmissionClient::new(base_url, Duration::from_secs(2)).unwrap();
    let catalog = VehicleRepository::sample().unwrap();
    let vehicle = catalog.find_by_id("2").unwrap();

    client
        .submit_enquiry(VehicleSummary::from(vehicle), &enquiry())
        .await
        .unwrap();

    let received = received.lock().unwrap();
    let (path, envelope) = &received[0];
    assert_eq!(path, "enquiries");
    assert_eq!(envelope["form"], "vehicle-enquiry");
    assert_eq!(envelope["vehicle"]["title"], "2023 Mercedes-Benz E-Class");
    assert_eq!(envelope["data"]["preferred_contact"], "whatsapp");
}

#[tokio::test]
async fn test_empty_success_body_gets_generated_reference() {
    let (base_url, _) = spawn_submission_stub(StubBehaviour::AcceptWithoutBody).await;
    let client = SubmissionClient::new(base_url, Duration::from_secs(2)).unwrap();

    let receipt = client.submit_contact(&contact()).await.unwrap();
    assert_eq!(receipt.reference.len(), 36);
}

#[tokio::test]
async fn test_rejection_is_external_api_error() {
    let (base_url, _) =
        spawn_submission_stub(StubBehaviour::Fail(StatusCode::INTERNAL_SERVER_ERROR)).await;
    let client = SubmissionClient::new(base_url, Duration::from_secs(2)).unwrap();

    let err = client.submit_contact(&contact()).await.unwrap_err();
    match err {
        AppError::ExternalApi { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "submission store is down");
        }
        other => panic!("expected ExternalApi, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_service_is_unavailable() {
    let client = SubmissionClient::new(unreachable_base_url().await, Duration::from_secs(2)).unwrap();

    let err = client.submit_contact(&contact()).await.unwrap_err();
    assert!(matches!(err, AppError::ServiceUnavailable(_)));
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let (base_url, _) =
        spawn_submission_stub(StubBehaviour::Hang(Duration::from_secs(5))).await;
    let client = SubmissionClient::new(base_url, Duration::from_millis(200)).unwrap();

    let err = client.submit_contact(&contact()).await.unwrap_err();
    assert!(matches!(err, AppError::ServiceUnavailable(msg) if msg.contains("timed out")));
}

// ---------------------------------------------------------------------------
// End to end through the API
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_contact_endpoint_forwards_form() {
    let (base_url, received) = spawn_submission_stub(StubBehaviour::Accept).await;
    let app = build_test_app(&base_url);

    let response = post_json(
        app,
        "/api/contact",
        json!({
            "name": "Ama Mensah",
            "email": "ama@example.com",
            "subject": "Fleet hire",
            "message": "We need three buses for a wedding in Kumasi."
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["reference"], "LEAD-0001");
    assert_eq!(received.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rental_application_endpoint_forwards_form() {
    let (base_url, received) = spawn_submission_stub(StubBehaviour::Accept).await;
    let app = build_test_app(&base_url);

    let response = post_json(
        app,
        "/api/rental-applications",
        json!({
            "vehicle_id": "11",
            "full_name": "Kwame Boateng",
            "email": "kwame@example.com",
            "phone": "0241234567",
            "licence_number": "GHA-123456",
            "start_date": "2024-12-20",
            "end_date": "2024-12-27",
            "pickup_location": "Kotoka International Airport"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json["message"],
        "Your 8-day rental application for the 2021 Toyota Land Cruiser V8 has been received"
    );

    let received = received.lock().unwrap();
    let (path, envelope) = &received[0];
    assert_eq!(path, "rental-applications");
    assert_eq!(envelope["vehicle"]["id"], "11");
    assert_eq!(envelope["data"]["with_driver"], false);
}

#[tokio::test]
async fn test_upstream_failure_surfaces_as_bad_gateway() {
    let (base_url, _) =
        spawn_submission_stub(StubBehaviour::Fail(StatusCode::SERVICE_UNAVAILABLE)).await;
    let app = build_test_app(&base_url);

    let response = post_json(
        app,
        "/api/enquiries",
        json!({
            "vehicle_id": "2",
            "name": "Kofi Asante",
            "email": "kofi@example.com",
            "phone": "0201234567"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "EXTERNAL_API_ERROR");
    assert_eq!(json["details"]["upstream_status"], 503);
}
