pub mod enquiry;
pub mod filter;
pub mod vehicle;
