pub mod enquiry_controller;
pub mod vehicle_controller;
