//! Catalog query engine
//!
//! Filters and orders one catalog partition (sale or rental vehicles) for a
//! `FilterSpecification`. Pure: the input slice is only borrowed and the
//! result holds references into it.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::filter::{FilterSpecification, SortKey};
use crate::models::vehicle::Vehicle;

/// Run a query over a pre-partitioned catalog.
///
/// Every active predicate must pass. The status partition is the caller's
/// job, nothing here looks at `Vehicle::status` except to pick the relevant
/// price. Sorting is stable, so equal keys keep catalog order.
pub fn query<'a>(catalog: &'a [Vehicle], spec: &FilterSpecification) -> Vec<&'a Vehicle> {
    let search = spec.search.trim().to_lowercase();

    let mut results: Vec<&Vehicle> = catalog
        .iter()
        .filter(|v| matches_normalized_search(v, &search))
        .filter(|v| matches_category(v, spec))
        .filter(|v| matches_make(v, spec))
        .filter(|v| matches_price(v, spec))
        .collect();

    sort_vehicles(&mut results, spec.sort);

    debug!(
        "Catalog query matched {}/{} vehicles (sort: {})",
        results.len(),
        catalog.len(),
        spec.sort
    );
    results
}

/// Case-insensitive substring match on make, model or year.
pub fn matches_search(vehicle: &Vehicle, spec: &FilterSpecification) -> bool {
    matches_normalized_search(vehicle, &spec.search.trim().to_lowercase())
}

fn matches_normalized_search(vehicle: &Vehicle, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    vehicle.make.to_lowercase().contains(search)
        || vehicle.model.to_lowercase().contains(search)
        || vehicle.year.to_string().contains(search)
}

pub fn matches_category(vehicle: &Vehicle, spec: &FilterSpecification) -> bool {
    spec.category.matches(vehicle.category)
}

pub fn matches_make(vehicle: &Vehicle, spec: &FilterSpecification) -> bool {
    spec.make.matches(&vehicle.make)
}

pub fn matches_price(vehicle: &Vehicle, spec: &FilterSpecification) -> bool {
    spec.price_range.admits(vehicle.relevant_price())
}

fn sort_vehicles(vehicles: &mut [&Vehicle], sort: SortKey) {
    match sort {
        SortKey::Newest => vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::PriceAsc => {
            vehicles.sort_by(|a, b| cmp_price(a.relevant_price(), b.relevant_price(), false))
        }
        SortKey::PriceDesc => {
            vehicles.sort_by(|a, b| cmp_price(a.relevant_price(), b.relevant_price(), true))
        }
        SortKey::YearDesc => vehicles.sort_by(|a, b| b.year.cmp(&a.year)),
    }
}

/// Unknown prices go last in both directions.
fn cmp_price(a: Option<Decimal>, b: Option<Decimal>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if descending => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Distinct makes of a partition, sorted, for the make selector.
pub fn available_makes(catalog: &[Vehicle]) -> Vec<String> {
    let mut makes: Vec<String> = catalog.iter().map(|v| v.make.clone()).collect();
    makes.sort();
    makes.dedup();
    makes
}

/// Lowest and highest known price of a partition.
pub fn price_bounds(catalog: &[Vehicle]) -> Option<(Decimal, Decimal)> {
    let mut prices = catalog.iter().filter_map(Vehicle::relevant_price);
    let first = prices.next()?;
    Some(prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
}
