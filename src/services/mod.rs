pub mod review_query;
pub mod review_service;
pub mod review_validation;

pub use review_service::*;
