use tracing::info;
use validator::Validate;

use crate::clients::submission_client::SubmissionClient;
use crate::dto::enquiry_dto::{SubmissionReceipt, VehicleSummary};
use crate::dto::ApiResponse;
use crate::models::enquiry::{ContactRequest, RentalApplicationRequest, VehicleEnquiryRequest};
use crate::models::filter::RentalDates;
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{bad_request_error, not_found_error, AppResult};

pub struct EnquiryController {
    repository: VehicleRepository,
    client: SubmissionClient,
}

impl EnquiryController {
    pub fn new(repository: VehicleRepository, client: SubmissionClient) -> Self {
        Self { repository, client }
    }

    pub async fn contact(
        &self,
        request: ContactRequest,
    ) -> AppResult<ApiResponse<SubmissionReceipt>> {
        request.validate()?;

        let receipt = self.client.submit_contact(&request).await?;
        info!("Contact form from {} forwarded", request.email);

        Ok(ApiResponse::success_with_message(
            receipt,
            "Thank you, we will get back to you shortly".to_string(),
        ))
    }

    pub async fn enquiry(
        &self,
        request: VehicleEnquiryRequest,
    ) -> AppResult<ApiResponse<SubmissionReceipt>> {
        request.validate()?;
        let vehicle = self.vehicle(&request.vehicle_id)?;

        let receipt = self
            .client
            .submit_enquiry(VehicleSummary::from(vehicle), &request)
            .await?;
        info!("Enquiry about vehicle {} forwarded", vehicle.id);

        Ok(ApiResponse::success_with_message(
            receipt,
            format!("Your enquiry about the {} has been received", vehicle.title()),
        ))
    }

    pub async fn rental_application(
        &self,
        request: RentalApplicationRequest,
    ) -> AppResult<ApiResponse<SubmissionReceipt>> {
        request.validate()?;
        let vehicle = self.vehicle(&request.vehicle_id)?;

        if vehicle.status != VehicleStatus::ForRent {
            return Err(bad_request_error("This vehicle is not available for rent"));
        }
        if !vehicle.available {
            return Err(bad_request_error("This vehicle is currently unavailable"));
        }

        let receipt = self
            .client
            .submit_rental_application(VehicleSummary::from(vehicle), &request)
            .await?;
        let days = RentalDates {
            start: request.start_date,
            end: request.end_date,
        }
        .days();
        info!(
            "Rental application for vehicle {} ({} to {}, {} days) forwarded",
            vehicle.id, request.start_date, request.end_date, days
        );

        Ok(ApiResponse::success_with_message(
            receipt,
            format!(
                "Your {}-day rental application for the {} has been received",
                days,
                vehicle.title()
            ),
        ))
    }

    fn vehicle(&self, id: &str) -> AppResult<&Vehicle> {
        self.repository
            .find_by_id(id)
            .ok_or_else(|| not_found_error("Vehicle", id))
    }
}
