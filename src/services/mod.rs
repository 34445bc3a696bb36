//! Catalog logic: the query engine, the price slider and the browsing session

pub mod catalog_query;
pub mod catalog_session;
pub mod range_slider;
