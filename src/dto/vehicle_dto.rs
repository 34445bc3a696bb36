use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::filter::{CategoryFilter, FilterSpecification, MakeFilter, SortKey};
use crate::models::vehicle::{
    FuelType, Transmission, Vehicle, VehicleCategory, VehicleStatus,
};
use crate::services::range_slider::format_cedis;

// Catalog query string, e.g. `?status=for-rent&category=suv&max_price=1500&sort=price-asc`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VehicleQueryParams {
    pub status: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub make: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub sort: Option<String>,
}

/// Write a specification back to query parameters. Constraint-free fields are
/// left out; `status` is the caller's to fill in.
impl From<&FilterSpecification> for VehicleQueryParams {
    fn from(spec: &FilterSpecification) -> Self {
        let range = &spec.price_range;
        let whole_cedis = |amount: Decimal| amount.trunc().to_u64();

        Self {
            status: None,
            search: (!spec.search.is_empty()).then(|| spec.search.clone()),
            category: match &spec.category {
                CategoryFilter::All => None,
                other => Some(String::from(other.clone())),
            },
            make: match &spec.make {
                MakeFilter::Any => None,
                MakeFilter::Exactly(make) => Some(make.clone()),
            },
            min_price: if range.min > range.floor {
                whole_cedis(range.min)
            } else {
                None
            },
            max_price: if range.max < range.ceiling {
                whole_cedis(range.max)
            } else {
                None
            },
            start_date: spec
                .rental_dates
                .map(|dates| dates.start.format("%Y-%m-%d").to_string()),
            end_date: spec
                .rental_dates
                .map(|dates| dates.end.format("%Y-%m-%d").to_string()),
            sort: (spec.sort != SortKey::default()).then(|| spec.sort.to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusParams {
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeaturedParams {
    pub limit: Option<usize>,
}

// Card shown in the dealership and rentals grids
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleCard {
    pub id: String,
    pub title: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub category: VehicleCategory,
    pub status: VehicleStatus,
    pub price: Option<Decimal>,
    pub daily_rate: Option<Decimal>,
    pub price_label: String,
    pub mileage: u32,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub image: Option<String>,
    pub rating: Option<f32>,
    pub available: bool,
}

impl From<&Vehicle> for VehicleCard {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.clone(),
            title: vehicle.title(),
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year,
            category: vehicle.category,
            status: vehicle.status,
            price: vehicle.price,
            daily_rate: vehicle.daily_rate,
            price_label: price_label(vehicle),
            mileage: vehicle.mileage,
            fuel_type: vehicle.fuel_type,
            transmission: vehicle.transmission,
            image: vehicle.images.first().cloned(),
            rating: vehicle.rating,
            available: vehicle.available,
        }
    }
}

/// "GH₵ 650,000", "GH₵ 450 / day" or "Contact for price".
pub fn price_label(vehicle: &Vehicle) -> String {
    match (vehicle.status, vehicle.relevant_price()) {
        (VehicleStatus::ForSale, Some(price)) => format_cedis(price),
        (VehicleStatus::ForRent, Some(rate)) => format!("{} / day", format_cedis(rate)),
        (_, None) => "Contact for price".to_string(),
    }
}

/// Cheapest and dearest known price of a partition
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBounds {
    pub min: Decimal,
    pub max: Decimal,
}

impl From<(Decimal, Decimal)> for PriceBounds {
    fn from((min, max): (Decimal, Decimal)) -> Self {
        Self { min, max }
    }
}

// Response of the catalog listing
#[derive(Debug, Serialize)]
pub struct VehicleListResponse {
    pub total: usize,
    pub status: VehicleStatus,
    pub filters: FilterSpecification,
    /// Over the whole partition, not only the matches. `None` when nothing is priced.
    pub price_bounds: Option<PriceBounds>,
    pub vehicles: Vec<VehicleCard>,
}

// Response of the detail page
#[derive(Debug, Serialize)]
pub struct VehicleDetailResponse {
    pub vehicle: Vehicle,
    pub price_label: String,
    pub related: Vec<VehicleCard>,
}
