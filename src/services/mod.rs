pub mod idempotency;
pub mod payment_service;
