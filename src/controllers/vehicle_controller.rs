use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::dto::vehicle_dto::{
    price_label, PriceBounds, VehicleCard, VehicleDetailResponse, VehicleListResponse,
    VehicleQueryParams,
};
use crate::models::filter::{FilterSpecification, RentalDates, SortKey};
use crate::models::vehicle::VehicleStatus;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::catalog_query;
use crate::utils::errors::{bad_request_error, not_found_error, AppError, AppResult};
use crate::utils::validation::validate_date;

const RELATED_LIMIT: usize = 4;
const FEATURED_DEFAULT_LIMIT: usize = 6;
const FEATURED_MAX_LIMIT: usize = 24;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(repository: VehicleRepository) -> Self {
        Self { repository }
    }

    pub fn list(&self, params: VehicleQueryParams) -> AppResult<VehicleListResponse> {
        let status = parse_status(params.status.as_deref())?;
        let spec = build_spec(status, &params)?;

        let partition = self.repository.by_status(status);
        let vehicles: Vec<VehicleCard> = catalog_query::query(&partition, &spec)
            .into_iter()
            .map(VehicleCard::from)
            .collect();

        info!(
            "Catalog {} query '{}' returned {} vehicles",
            status,
            spec.search,
            vehicles.len()
        );

        Ok(VehicleListResponse {
            total: vehicles.len(),
            status,
            filters: spec,
            price_bounds: catalog_query::price_bounds(&partition).map(PriceBounds::from),
            vehicles,
        })
    }

    pub fn get_by_id(&self, id: &str) -> AppResult<VehicleDetailResponse> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        let related = self
            .repository
            .related(id, RELATED_LIMIT)
            .into_iter()
            .map(VehicleCard::from)
            .collect();

        Ok(VehicleDetailResponse {
            price_label: price_label(vehicle),
            vehicle: vehicle.clone(),
            related,
        })
    }

    pub fn makes(&self, status: Option<&str>) -> AppResult<Vec<String>> {
        let status = parse_status(status)?;
        Ok(catalog_query::available_makes(
            &self.repository.by_status(status),
        ))
    }

    pub fn featured(&self, limit: Option<usize>) -> Vec<VehicleCard> {
        let limit = limit
            .unwrap_or(FEATURED_DEFAULT_LIMIT)
            .min(FEATURED_MAX_LIMIT);
        self.repository
            .featured(limit)
            .into_iter()
            .map(VehicleCard::from)
            .collect()
    }
}

/// A missing or blank status means the sale partition.
fn parse_status(raw: Option<&str>) -> AppResult<VehicleStatus> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(VehicleStatus::ForSale),
        Some(raw) => raw.parse().map_err(|e: String| AppError::BadRequest(e)),
    }
}

/// Build the filter specification from query parameters. Unknown category
/// labels are kept and match nothing; an unknown sort key falls back to
/// newest first.
pub fn build_spec(
    status: VehicleStatus,
    params: &VehicleQueryParams,
) -> AppResult<FilterSpecification> {
    let mut spec = FilterSpecification::for_status(status);

    if let Some(search) = &params.search {
        spec = spec.with_search(search.clone());
    }
    if let Some(category) = &params.category {
        spec = spec.with_category(category);
    }
    if let Some(make) = &params.make {
        spec = spec.with_make(make);
    }
    if params.min_price.is_some() || params.max_price.is_some() {
        let min = params
            .min_price
            .map(Decimal::from)
            .unwrap_or(spec.price_range.floor);
        let max = params
            .max_price
            .map(Decimal::from)
            .unwrap_or(spec.price_range.ceiling);
        spec = spec.with_price(min, max);
    }

    match (&params.start_date, &params.end_date) {
        (Some(start), Some(end)) => {
            let start = validate_date(start)
                .map_err(|_| bad_request_error("start_date must use the YYYY-MM-DD format"))?;
            let end = validate_date(end)
                .map_err(|_| bad_request_error("end_date must use the YYYY-MM-DD format"))?;
            spec = spec.with_rental_dates(RentalDates { start, end });
        }
        (None, None) => {}
        _ => {
            return Err(bad_request_error(
                "start_date and end_date must be provided together",
            ))
        }
    }

    if let Some(sort) = &params.sort {
        match sort.parse::<SortKey>() {
            Ok(sort) => spec = spec.sorted_by(sort),
            Err(e) => warn!("{}, falling back to {}", e, SortKey::default()),
        }
    }

    Ok(spec)
}
