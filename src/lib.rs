pub mod adapters;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;

use services::payment_service::PaymentService;

#[derive(Clone)]
pub struct AppState {
    pub payments: PaymentService,
}
