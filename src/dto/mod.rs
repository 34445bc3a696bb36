//! Request and response shapes of the HTTP API

pub mod api_response;
pub mod enquiry_dto;
pub mod vehicle_dto;

pub use api_response::ApiResponse;
