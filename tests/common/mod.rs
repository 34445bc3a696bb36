#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use tower::ServiceExt;

use showroom::clients::SubmissionClient;
use showroom::config::EnvironmentConfig;
use showroom::repositories::vehicle_repository::VehicleRepository;
use showroom::routes::create_app_router;
use showroom::state::AppState;

/// Development config pointing the submission client at `submission_base_url`.
pub fn test_config(submission_base_url: &str) -> EnvironmentConfig {
    EnvironmentConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        submission_base_url: submission_base_url.to_string(),
        submission_timeout: Duration::from_secs(2),
        ..EnvironmentConfig::default()
    }
}

/// Full application router over the bundled sample catalog, built the same
/// way `main` builds it.
pub fn build_test_app(submission_base_url: &str) -> Router {
    let config = test_config(submission_base_url);
    let catalog = VehicleRepository::sample().expect("sample catalog should load");
    let submissions =
        SubmissionClient::new(config.submission_base_url.clone(), config.submission_timeout)
            .expect("client should build");
    create_app_router(AppState::new(config, catalog, submissions))
}

/// Router whose submission service is unreachable. Enough for every test that
/// never gets as far as forwarding a form.
pub fn build_offline_app() -> Router {
    build_test_app("http://127.0.0.1:9/forms")
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// What the stub submission service answers with.
#[derive(Clone, Copy)]
pub enum StubBehaviour {
    Accept,
    AcceptWithoutBody,
    Fail(StatusCode),
    Hang(Duration),
}

/// Bodies received by the stub, in arrival order.
pub type Received = Arc<Mutex<Vec<(String, serde_json::Value)>>>;

#[derive(Clone)]
struct StubState {
    behaviour: StubBehaviour,
    received: Received,
}

/// In-process submission service on an ephemeral port. Returns its base URL
/// and the list of envelopes it received.
pub async fn spawn_submission_stub(behaviour: StubBehaviour) -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        behaviour,
        received: received.clone(),
    };

    let app = Router::new()
        .route("/forms/contact", post(receive_contact))
        .route("/forms/enquiries", post(receive_enquiry))
        .route("/forms/rental-applications", post(receive_rental_application))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/forms", addr), received)
}

async fn receive_contact(state: State<StubState>, body: Json<serde_json::Value>) -> Response {
    receive(state, "contact", body).await
}

async fn receive_enquiry(state: State<StubState>, body: Json<serde_json::Value>) -> Response {
    receive(state, "enquiries", body).await
}

async fn receive_rental_application(
    state: State<StubState>,
    body: Json<serde_json::Value>,
) -> Response {
    receive(state, "rental-applications", body).await
}

async fn receive(
    State(state): State<StubState>,
    path: &'static str,
    Json(body): Json<serde_json::Value>,
) -> Response {
    state
        .received
        .lock()
        .unwrap()
        .push((path.to_string(), body));

    match state.behaviour {
        StubBehaviour::Accept => Json(serde_json::json!({
            "reference": "LEAD-0001",
            "received_at": "2024-12-01T10:00:00Z",
        }))
        .into_response(),
        StubBehaviour::AcceptWithoutBody => StatusCode::NO_CONTENT.into_response(),
        StubBehaviour::Fail(status) => (status, "submission store is down").into_response(),
        StubBehaviour::Hang(delay) => {
            tokio::time::sleep(delay).await;
            StatusCode::OK.into_response()
        }
    }
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/forms", addr)
}
