pub mod errors;
pub mod validation;
