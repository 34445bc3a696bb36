//! Shared application state
//!
//! Handed to every handler through the axum router. The catalog is
//! immutable and the HTTP client pools its connections, so clones are cheap.

use crate::clients::SubmissionClient;
use crate::config::EnvironmentConfig;
use crate::repositories::vehicle_repository::VehicleRepository;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub catalog: VehicleRepository,
    pub submissions: SubmissionClient,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        catalog: VehicleRepository,
        submissions: SubmissionClient,
    ) -> Self {
        Self {
            config,
            catalog,
            submissions,
        }
    }
}
