use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use crate::controllers::enquiry_controller::EnquiryController;
use crate::dto::enquiry_dto::SubmissionReceipt;
use crate::dto::ApiResponse;
use crate::models::enquiry::{ContactRequest, RentalApplicationRequest, VehicleEnquiryRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_enquiry_router() -> Router<AppState> {
    Router::new()
        .route("/contact", post(submit_contact))
        .route("/enquiries", post(submit_enquiry))
        .route("/rental-applications", post(submit_rental_application))
}

fn controller(state: &AppState) -> EnquiryController {
    EnquiryController::new(state.catalog.clone(), state.submissions.clone())
}

async fn submit_contact(
    State(state): State<AppState>,
    request: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SubmissionReceipt>>, AppError> {
    let Json(request) = request?;
    let response = controller(&state).contact(request).await?;
    Ok(Json(response))
}

async fn submit_enquiry(
    State(state): State<AppState>,
    request: Result<Json<VehicleEnquiryRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SubmissionReceipt>>, AppError> {
    let Json(request) = request?;
    let response = controller(&state).enquiry(request).await?;
    Ok(Json(response))
}

async fn submit_rental_application(
    State(state): State<AppState>,
    request: Result<Json<RentalApplicationRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SubmissionReceipt>>, AppError> {
    let Json(request) = request?;
    let response = controller(&state).rental_application(request).await?;
    Ok(Json(response))
}
