use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{
    FeaturedParams, StatusParams, VehicleCard, VehicleDetailResponse, VehicleListResponse,
    VehicleQueryParams,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/makes", get(list_makes))
        .route("/featured", get(list_featured))
        .route("/:id", get(get_vehicle))
}

async fn list_vehicles(
    State(state): State<AppState>,
    params: Result<Query<VehicleQueryParams>, QueryRejection>,
) -> Result<Json<ApiResponse<VehicleListResponse>>, AppError> {
    let Query(params) = params?;
    let controller = VehicleController::new(state.catalog.clone());
    let response = controller.list(params)?;
    Ok(Json(ApiResponse::success(response)))
}

async fn list_makes(
    State(state): State<AppState>,
    params: Result<Query<StatusParams>, QueryRejection>,
) -> Result<Json<Vec<String>>, AppError> {
    let Query(params) = params?;
    let controller = VehicleController::new(state.catalog.clone());
    let response = controller.makes(params.status.as_deref())?;
    Ok(Json(response))
}

async fn list_featured(
    State(state): State<AppState>,
    params: Result<Query<FeaturedParams>, QueryRejection>,
) -> Result<Json<Vec<VehicleCard>>, AppError> {
    let Query(params) = params?;
    let controller = VehicleController::new(state.catalog.clone());
    Ok(Json(controller.featured(params.limit)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VehicleDetailResponse>, AppError> {
    let controller = VehicleController::new(state.catalog.clone());
    let response = controller.get_by_id(&id)?;
    Ok(Json(response))
}
