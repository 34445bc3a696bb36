//! Filter specification
//!
//! Plain value object describing the active catalog query. Every field has an
//! explicit "no constraint" value so `FilterSpecification::default()` matches
//! the whole partition it is applied to.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::vehicle::{VehicleCategory, VehicleStatus};

/// Upper bound of the sale price slider, in cedis.
pub const SALE_PRICE_CEILING: i64 = 800_000;
/// Upper bound of the daily rate slider, in cedis.
pub const RENTAL_RATE_CEILING: i64 = 5_000;

/// Labels accepted by the category selector on every catalog surface.
///
/// The dealership and rentals pages share this table, so a label means the
/// same thing wherever it is used.
const CATEGORY_ALIASES: &[(&str, VehicleCategory)] = &[
    ("sedan", VehicleCategory::Sedan),
    ("sedans", VehicleCategory::Sedan),
    ("saloon", VehicleCategory::Sedan),
    ("suv", VehicleCategory::Suv),
    ("suvs", VehicleCategory::Suv),
    ("4x4", VehicleCategory::Suv),
    ("truck", VehicleCategory::Truck),
    ("trucks", VehicleCategory::Truck),
    ("pickup", VehicleCategory::Truck),
    ("pick-up", VehicleCategory::Truck),
    ("van", VehicleCategory::Van),
    ("vans", VehicleCategory::Van),
    ("minivan", VehicleCategory::Van),
    ("bus", VehicleCategory::Bus),
    ("buses", VehicleCategory::Bus),
    ("minibus", VehicleCategory::Bus),
    ("coach", VehicleCategory::Bus),
    ("luxury", VehicleCategory::Luxury),
    ("premium", VehicleCategory::Luxury),
];

/// Resolve a selector label to a canonical category.
pub fn normalize_category(label: &str) -> Option<VehicleCategory> {
    let key = label.trim().to_lowercase();
    CATEGORY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, category)| *category)
}

/// Category selector value
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(VehicleCategory),
    /// A label with no catalog category (e.g. "sport"). Matches nothing.
    Unrecognized(String),
}

impl CategoryFilter {
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return CategoryFilter::All;
        }
        match normalize_category(trimmed) {
            Some(category) => CategoryFilter::Only(category),
            None => CategoryFilter::Unrecognized(trimmed.to_string()),
        }
    }

    pub fn matches(&self, category: VehicleCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
            CategoryFilter::Unrecognized(_) => false,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(label: String) -> Self {
        CategoryFilter::from_label(&label)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => "all".to_string(),
            CategoryFilter::Only(category) => category.as_str().to_string(),
            CategoryFilter::Unrecognized(label) => label,
        }
    }
}

/// Make selector value. Makes are proper nouns and compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MakeFilter {
    #[default]
    Any,
    Exactly(String),
}

impl MakeFilter {
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("any")
            || trimmed.eq_ignore_ascii_case("all")
        {
            MakeFilter::Any
        } else {
            MakeFilter::Exactly(trimmed.to_string())
        }
    }

    pub fn matches(&self, make: &str) -> bool {
        match self {
            MakeFilter::Any => true,
            MakeFilter::Exactly(wanted) => wanted == make,
        }
    }
}

impl From<String> for MakeFilter {
    fn from(label: String) -> Self {
        MakeFilter::from_label(&label)
    }
}

impl From<MakeFilter> for String {
    fn from(filter: MakeFilter) -> Self {
        match filter {
            MakeFilter::Any => "any".to_string(),
            MakeFilter::Exactly(make) => make,
        }
    }
}

/// Inclusive price window inside the slider's `[floor, ceiling]` track.
///
/// A range is "narrowed" once either end moved off the track limits. An end
/// resting on its track limit is open, so the untouched range also admits
/// prices outside the track. Vehicles without a price stay visible only while
/// the range is not narrowed, since their real price is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub floor: Decimal,
    pub ceiling: Decimal,
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    /// Full, unconstrained range over `[floor, ceiling]`.
    pub fn new(floor: Decimal, ceiling: Decimal) -> Self {
        Self {
            floor,
            ceiling,
            min: floor,
            max: ceiling,
        }
    }

    pub fn sale_default() -> Self {
        Self::new(Decimal::ZERO, Decimal::from(SALE_PRICE_CEILING))
    }

    pub fn rental_default() -> Self {
        Self::new(Decimal::ZERO, Decimal::from(RENTAL_RATE_CEILING))
    }

    pub fn for_status(status: VehicleStatus) -> Self {
        match status {
            VehicleStatus::ForSale => Self::sale_default(),
            VehicleStatus::ForRent => Self::rental_default(),
        }
    }

    /// Same track with a new selection. Values are kept as given, so an
    /// inverted selection simply matches nothing.
    pub fn narrowed(self, min: Decimal, max: Decimal) -> Self {
        Self { min, max, ..self }
    }

    pub fn is_narrowed(&self) -> bool {
        self.min > self.floor || self.max < self.ceiling
    }

    pub fn contains(&self, price: Decimal) -> bool {
        let above_min = self.min <= self.floor || self.min <= price;
        let below_max = self.max >= self.ceiling || price <= self.max;
        above_min && below_max
    }

    /// Whether a vehicle with this (possibly unknown) price passes the range.
    pub fn admits(&self, price: Option<Decimal>) -> bool {
        match price {
            Some(price) => self.contains(price),
            None => !self.is_narrowed(),
        }
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::sale_default()
    }
}

/// Requested rental period. Informational only, not checked against availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalDates {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl RentalDates {
    /// Number of rental days, counting both ends. Zero for an inverted period.
    pub fn days(&self) -> i64 {
        let days = (self.end - self.start).num_days();
        if days < 0 {
            0
        } else {
            days + 1
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    YearDesc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::YearDesc => "year-desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" | "newest-first" | "latest" => Ok(SortKey::Newest),
            "price-asc" | "price-low" | "price-ascending" => Ok(SortKey::PriceAsc),
            "price-desc" | "price-high" | "price-descending" => Ok(SortKey::PriceDesc),
            "year-desc" | "year" | "year-descending" => Ok(SortKey::YearDesc),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}

/// Active catalog query
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpecification {
    pub search: String,
    pub category: CategoryFilter,
    pub make: MakeFilter,
    pub price_range: PriceRange,
    pub rental_dates: Option<RentalDates>,
    pub sort: SortKey,
}

impl FilterSpecification {
    /// Unconstrained specification with the price track of the given partition.
    pub fn for_status(status: VehicleStatus) -> Self {
        Self {
            price_range: PriceRange::for_status(status),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, label: &str) -> Self {
        self.category = CategoryFilter::from_label(label);
        self
    }

    pub fn with_make(mut self, label: &str) -> Self {
        self.make = MakeFilter::from_label(label);
        self
    }

    pub fn with_price(mut self, min: Decimal, max: Decimal) -> Self {
        self.price_range = self.price_range.narrowed(min, max);
        self
    }

    pub fn with_rental_dates(mut self, dates: RentalDates) -> Self {
        self.rental_dates = Some(dates);
        self
    }

    pub fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }
}
