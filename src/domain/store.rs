use {
    super::error::StoreError,
    super::payment::{NewPayment, Payment, PaymentId},
    std::{future::Future, pin::Pin},
};

pub trait PaymentStore: Send + Sync {
    /// Assigns an id and inserts. When the candidate's idempotency key is
    /// already bound, nothing is inserted and the existing record is
    /// returned instead.
    fn add(
        &self,
        payment: NewPayment,
    ) -> Pin<Box<dyn Future<Output = Result<Payment, StoreError>> + Send + '_>>;

    fn get(
        &self,
        id: PaymentId,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Payment>, StoreError>> + Send + '_>>;

    fn find_by_idempotency_key(
        &self,
        key: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Payment>, StoreError>> + Send + '_>>;
}
