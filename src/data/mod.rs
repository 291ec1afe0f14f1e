pub mod prediction_api;
pub mod types;
