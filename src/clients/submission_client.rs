//! HTTP client for the lead submission service
//!
//! Forms are POSTed as JSON envelopes to `{base_url}/{form path}`. A 2xx
//! answer is a success, anything else is surfaced to the visitor as a failed
//! submission they can retry.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::dto::enquiry_dto::{FormKind, SubmissionEnvelope, SubmissionReceipt, VehicleSummary};
use crate::models::enquiry::{ContactRequest, RentalApplicationRequest, VehicleEnquiryRequest};
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct SubmissionClient {
    client: Client,
    base_url: String,
}

impl SubmissionClient {
    /// Create a client with its own connection pool and request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Error building HTTP client: {}", e)))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn submit_contact(&self, request: &ContactRequest) -> AppResult<SubmissionReceipt> {
        self.submit(FormKind::Contact, None, request).await
    }

    pub async fn submit_enquiry(
        &self,
        vehicle: VehicleSummary,
        request: &VehicleEnquiryRequest,
    ) -> AppResult<SubmissionReceipt> {
        self.submit(FormKind::VehicleEnquiry, Some(vehicle), request).await
    }

    pub async fn submit_rental_application(
        &self,
        vehicle: VehicleSummary,
        request: &RentalApplicationRequest,
    ) -> AppResult<SubmissionReceipt> {
        self.submit(FormKind::RentalApplication, Some(vehicle), request)
            .await
    }

    async fn submit<T: Serialize>(
        &self,
        form: FormKind,
        vehicle: Option<VehicleSummary>,
        data: &T,
    ) -> AppResult<SubmissionReceipt> {
        let url = format!("{}/{}", self.base_url, form.path());
        let envelope = SubmissionEnvelope {
            form,
            submitted_at: Utc::now(),
            vehicle,
            data,
        };

        debug!("Submitting {:?} form to {}", form, url);
        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .json(&envelope)
            .send()
            .await
            .map_err(|e| {
                warn!("Submission to {} failed: {}", url, e);
                if e.is_timeout() {
                    AppError::ServiceUnavailable("The submission service timed out".to_string())
                } else {
                    AppError::ServiceUnavailable(format!(
                        "Could not reach the submission service: {}",
                        e
                    ))
                }
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(AppError::ExternalApi {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
            });
        }

        let receipt = serde_json::from_str::<SubmissionReceipt>(&body).unwrap_or_else(|_| {
            SubmissionReceipt {
                reference: Uuid::new_v4().to_string(),
                received_at: Utc::now(),
            }
        });
        info!(
            "{:?} form accepted with reference {}",
            form, receipt.reference
        );
        Ok(receipt)
    }
}
