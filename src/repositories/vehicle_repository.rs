use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::validate_range;

/// Catalog bundled with the binary, used when no `CATALOG_PATH` is configured.
const SAMPLE_CATALOG: &str = include_str!("../../data/vehicles.json");

/// Read-only vehicle catalog
///
/// Loaded once at start-up and shared between requests. Nothing mutates it
/// afterwards, so clones are cheap handles on the same slice.
#[derive(Debug, Clone)]
pub struct VehicleRepository {
    vehicles: Arc<[Vehicle]>,
}

impl VehicleRepository {
    pub fn new(vehicles: Vec<Vehicle>) -> AppResult<Self> {
        let mut seen = HashSet::with_capacity(vehicles.len());
        for vehicle in &vehicles {
            if !seen.insert(vehicle.id.as_str()) {
                return Err(AppError::Catalog(format!(
                    "duplicate vehicle id '{}'",
                    vehicle.id
                )));
            }
            if let Some(rating) = vehicle.rating {
                validate_range(rating, 0.0, 5.0).map_err(|_| {
                    AppError::Catalog(format!(
                        "vehicle '{}' has rating {} outside 0-5",
                        vehicle.id, rating
                    ))
                })?;
            }
            if vehicle.status == VehicleStatus::ForSale && vehicle.daily_rate.is_some() {
                return Err(AppError::Catalog(format!(
                    "vehicle '{}' is for sale but carries a daily rate",
                    vehicle.id
                )));
            }
        }

        Ok(Self {
            vehicles: vehicles.into(),
        })
    }

    pub fn from_json(json: &str) -> AppResult<Self> {
        let vehicles: Vec<Vehicle> = serde_json::from_str(json)
            .map_err(|e| AppError::Catalog(format!("Error parsing catalog: {}", e)))?;
        Self::new(vehicles)
    }

    pub fn from_path(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::Catalog(format!("Error reading catalog {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Bundled sample catalog
    pub fn sample() -> AppResult<Self> {
        Self::from_json(SAMPLE_CATALOG)
    }

    /// Load from the configured file, falling back to the bundled sample.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let repository = match path {
            Some(path) => {
                info!("Loading vehicle catalog from {}", path.display());
                Self::from_path(path)?
            }
            None => {
                info!("Loading bundled sample vehicle catalog");
                Self::sample()?
            }
        };
        info!("Catalog ready with {} vehicles", repository.len());
        Ok(repository)
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn all(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Vehicles of one partition, in catalog order.
    pub fn by_status(&self, status: VehicleStatus) -> Vec<Vehicle> {
        let vehicles: Vec<Vehicle> = self
            .vehicles
            .iter()
            .filter(|v| v.status == status)
            .cloned()
            .collect();
        debug!("Partition {} holds {} vehicles", status, vehicles.len());
        vehicles
    }

    /// `None` when no vehicle has this id.
    pub fn find_by_id(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// Available vehicles with the best ratings; unrated ones come last.
    pub fn featured(&self, limit: usize) -> Vec<&Vehicle> {
        let mut vehicles: Vec<&Vehicle> = self.vehicles.iter().filter(|v| v.available).collect();
        vehicles.sort_by(|a, b| match (a.rating, b.rating) {
            (Some(a), Some(b)) => b.total_cmp(&a),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        vehicles.truncate(limit);
        vehicles
    }

    /// Other vehicles of the same category and status.
    pub fn related(&self, id: &str, limit: usize) -> Vec<&Vehicle> {
        let Some(vehicle) = self.find_by_id(id) else {
            return Vec::new();
        };
        self.vehicles
            .iter()
            .filter(|v| {
                v.id != vehicle.id && v.category == vehicle.category && v.status == vehicle.status
            })
            .take(limit)
            .collect()
    }
}
