pub mod api_error;
pub mod config;
pub mod in_flight;
