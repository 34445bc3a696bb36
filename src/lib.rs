//! Vehicle dealership and rental showroom backend
//!
//! Serves the sale and rental catalogs with search, filters and sorting, and
//! forwards contact, enquiry and rental application forms to the lead
//! submission service.

pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
