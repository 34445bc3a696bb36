use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::vehicle::Vehicle;

/// Which lead form produced a submission
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FormKind {
    Contact,
    VehicleEnquiry,
    RentalApplication,
}

impl FormKind {
    /// Path of the form's endpoint under the submission base URL.
    pub fn path(&self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::VehicleEnquiry => "enquiries",
            FormKind::RentalApplication => "rental-applications",
        }
    }
}

/// Vehicle context attached to enquiries and rental applications
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleSummary {
    pub id: String,
    pub title: String,
    pub status: String,
}

impl From<&Vehicle> for VehicleSummary {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.clone(),
            title: vehicle.title(),
            status: vehicle.status.to_string(),
        }
    }
}

/// Body POSTed to the submission service
#[derive(Debug, Serialize)]
pub struct SubmissionEnvelope<'a, T: Serialize> {
    pub form: FormKind,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<VehicleSummary>,
    pub data: &'a T,
}

/// Acknowledgement returned to the visitor once the submission service accepted a form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionReceipt {
    pub reference: String,
    pub received_at: DateTime<Utc>,
}
