//! Catalog browsing session
//!
//! Explicit state behind one catalog page: the partition being browsed, the
//! active filter specification, the price slider and the current results.
//! Pages hold one of these instead of keeping filter fields of their own, and
//! the specification can be written back to URL query parameters.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::dto::vehicle_dto::VehicleQueryParams;
use crate::models::filter::{
    CategoryFilter, FilterSpecification, MakeFilter, PriceRange, RentalDates, SortKey,
};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::catalog_query;
use crate::services::range_slider::{Handle, RangeSlider};
use crate::utils::errors::AppResult;

const SALE_SLIDER_STEP: i64 = 10_000;
const RENTAL_SLIDER_STEP: i64 = 50;

pub fn slider_step(status: VehicleStatus) -> Decimal {
    match status {
        VehicleStatus::ForSale => Decimal::from(SALE_SLIDER_STEP),
        VehicleStatus::ForRent => Decimal::from(RENTAL_SLIDER_STEP),
    }
}

pub struct CatalogSession {
    status: VehicleStatus,
    partition: Arc<[Vehicle]>,
    spec: FilterSpecification,
    slider: RangeSlider,
    results: Vec<Vehicle>,
    requeries: usize,
}

impl CatalogSession {
    pub fn new(repository: &VehicleRepository, status: VehicleStatus) -> AppResult<Self> {
        Self::with_spec(repository, status, FilterSpecification::for_status(status))
    }

    /// Resume a session from a stored specification (e.g. URL query parameters).
    pub fn with_spec(
        repository: &VehicleRepository,
        status: VehicleStatus,
        spec: FilterSpecification,
    ) -> AppResult<Self> {
        let slider = RangeSlider::for_range(spec.price_range, slider_step(status))?;
        // the slider clamps what it was given; the committed range follows it
        let spec = FilterSpecification {
            price_range: slider.range(),
            ..spec
        };
        let mut session = Self {
            status,
            partition: repository.by_status(status).into(),
            spec,
            slider,
            results: Vec::new(),
            requeries: 0,
        };
        session.run_query();
        Ok(session)
    }

    pub fn status(&self) -> VehicleStatus {
        self.status
    }

    pub fn spec(&self) -> &FilterSpecification {
        &self.spec
    }

    pub fn results(&self) -> &[Vehicle] {
        &self.results
    }

    pub fn result_ids(&self) -> Vec<&str> {
        self.results.iter().map(|v| v.id.as_str()).collect()
    }

    /// Number of queries run since the session was opened.
    pub fn requery_count(&self) -> usize {
        self.requeries
    }

    pub fn price_label(&self) -> String {
        self.slider.display_label()
    }

    /// Returns whether the catalog was requeried.
    pub fn set_search(&mut self, search: &str) -> bool {
        if self.spec.search == search {
            return false;
        }
        self.spec.search = search.to_string();
        self.requery()
    }

    pub fn set_category(&mut self, label: &str) -> bool {
        let category = CategoryFilter::from_label(label);
        if self.spec.category == category {
            return false;
        }
        self.spec.category = category;
        self.requery()
    }

    pub fn set_make(&mut self, label: &str) -> bool {
        let make = MakeFilter::from_label(label);
        if self.spec.make == make {
            return false;
        }
        self.spec.make = make;
        self.requery()
    }

    pub fn set_sort(&mut self, sort: SortKey) -> bool {
        if self.spec.sort == sort {
            return false;
        }
        self.spec.sort = sort;
        self.requery()
    }

    pub fn set_rental_dates(&mut self, start: NaiveDate, end: NaiveDate) -> bool {
        let dates = Some(RentalDates { start, end });
        if self.spec.rental_dates == dates {
            return false;
        }
        self.spec.rental_dates = dates;
        self.requery()
    }

    pub fn begin_price_drag(&mut self, handle: Handle) {
        self.slider.begin_drag(handle);
    }

    /// Move the dragged price handle. Only the label changes; returns it.
    pub fn drag_price(&mut self, value: Decimal) -> String {
        self.slider.drag_to(value);
        self.slider.display_label()
    }

    /// Commit the slider on pointer release.
    pub fn release_price_handle(&mut self) -> bool {
        match self.slider.release() {
            Some(range) if range != self.spec.price_range => {
                self.spec.price_range = range;
                self.requery()
            }
            _ => false,
        }
    }

    /// Back to an unconstrained specification for this partition.
    pub fn reset_filters(&mut self) -> bool {
        let fresh = FilterSpecification::for_status(self.status);
        self.slider.reset();
        if self.spec == fresh {
            return false;
        }
        self.spec = fresh;
        self.requery()
    }

    /// Query string form of the session, e.g. for a shareable catalog URL.
    pub fn query_params(&self) -> VehicleQueryParams {
        VehicleQueryParams {
            status: Some(self.status.to_string()),
            ..VehicleQueryParams::from(&self.spec)
        }
    }

    /// Current committed price range.
    pub fn price_range(&self) -> PriceRange {
        self.spec.price_range
    }

    fn requery(&mut self) -> bool {
        self.requeries += 1;
        self.run_query();
        true
    }

    fn run_query(&mut self) {
        self.results = catalog_query::query(&self.partition, &self.spec)
            .into_iter()
            .cloned()
            .collect();
        debug!(
            "Session ({}) now shows {} vehicles",
            self.status,
            self.results.len()
        );
    }
}
