pub mod payment_store;
