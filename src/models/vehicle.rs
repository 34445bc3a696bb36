//! Vehicle model
//!
//! The catalog entity shown on the dealership and rentals pages. The catalog
//! is loaded once and never mutated, so the struct carries no update requests.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Vehicle category - fixed set used by every catalog surface
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VehicleCategory {
    Sedan,
    Suv,
    Truck,
    Van,
    Bus,
    Luxury,
}

impl VehicleCategory {
    pub const ALL: [VehicleCategory; 6] = [
        VehicleCategory::Sedan,
        VehicleCategory::Suv,
        VehicleCategory::Truck,
        VehicleCategory::Van,
        VehicleCategory::Bus,
        VehicleCategory::Luxury,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleCategory::Sedan => "sedan",
            VehicleCategory::Suv => "suv",
            VehicleCategory::Truck => "truck",
            VehicleCategory::Van => "van",
            VehicleCategory::Bus => "bus",
            VehicleCategory::Luxury => "luxury",
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commercial status - decides which partition a vehicle belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleStatus {
    ForSale,
    ForRent,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::ForSale => "for-sale",
            VehicleStatus::ForRent => "for-rent",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "for-sale" | "sale" => Ok(VehicleStatus::ForSale),
            "for-rent" | "rent" | "rental" => Ok(VehicleStatus::ForRent),
            other => Err(format!("unknown vehicle status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Petrol,
    Diesel,
    Hybrid,
    Electric,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Transmission {
    Automatic,
    Manual,
}

/// Vehicle principal - one record of the static catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub category: VehicleCategory,
    pub status: VehicleStatus,
    /// Sale price in cedis. `None` means "contact for price", not zero.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Daily rental rate in cedis, only meaningful for rental vehicles.
    #[serde(default)]
    pub daily_rate: Option<Decimal>,
    pub mileage: u32,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub engine_size: String,
    pub drivetrain: String,
    pub color: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub available: bool,
    #[serde(default)]
    pub rating: Option<f32>,
}

impl Vehicle {
    /// Price the catalog filters and sorts on: sale price for sale vehicles,
    /// daily rate for rentals.
    pub fn relevant_price(&self) -> Option<Decimal> {
        match self.status {
            VehicleStatus::ForSale => self.price,
            VehicleStatus::ForRent => self.daily_rate,
        }
    }

    pub fn title(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}
