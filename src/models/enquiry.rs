//! Lead-capture form payloads
//!
//! Contact, vehicle enquiry and rental application forms. Field rules are
//! declared with `validator` so every violation is reported per field.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::validation::{validate_not_empty, validate_phone};

/// How the customer wants to be contacted back
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PreferredContact {
    #[default]
    Phone,
    Email,
    WhatsApp,
}

/// General contact form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    #[validate(length(min = 2, max = 150))]
    pub subject: String,

    #[validate(length(min = 10, max = 2000))]
    pub message: String,
}

/// Enquiry about a specific catalog vehicle
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VehicleEnquiryRequest {
    #[validate(custom = "validate_not_empty")]
    pub vehicle_id: String,

    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(custom = "validate_phone")]
    pub phone: String,

    #[validate(length(max = 2000))]
    pub message: Option<String>,

    #[serde(default)]
    pub preferred_contact: PreferredContact,
}

/// Rental application for a rental-partition vehicle
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_rental_period"))]
pub struct RentalApplicationRequest {
    #[validate(custom = "validate_not_empty")]
    pub vehicle_id: String,

    #[validate(length(min = 2, max = 100))]
    pub full_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(custom = "validate_phone")]
    pub phone: String,

    #[validate(length(min = 5, max = 30))]
    pub licence_number: String,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    #[validate(length(min = 2, max = 200))]
    pub pickup_location: String,

    #[serde(default)]
    pub with_driver: bool,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

fn validate_rental_period(request: &RentalApplicationRequest) -> Result<(), ValidationError> {
    if request.end_date < request.start_date {
        let mut error = ValidationError::new("rental_period");
        error.add_param("start_date".into(), &request.start_date.to_string());
        error.add_param("end_date".into(), &request.end_date.to_string());
        return Err(error);
    }
    Ok(())
}
