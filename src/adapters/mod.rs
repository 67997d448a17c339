pub mod api_errors;
pub mod bank_simulator;
pub mod http;
