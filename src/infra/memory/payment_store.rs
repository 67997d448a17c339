use {
    crate::domain::{
        error::StoreError,
        payment::{NewPayment, Payment, PaymentId},
        store::PaymentStore,
    },
    std::{collections::HashMap, future::Future, pin::Pin, sync::Arc},
    tokio::sync::RwLock,
};

#[derive(Default)]
struct Inner {
    payments: HashMap<PaymentId, Payment>,
    idempotency: HashMap<String, PaymentId>,
}

/// Process-local payment storage. Clones share the same maps; everything
/// is lost on restart.
///
/// Reads take the shared lock. `add` holds the exclusive lock across the
/// idempotency lookup, id assignment and insert, so two adds with the same
/// key can never both insert.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.payments.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn add_inner(&self, payment: NewPayment) -> Result<Payment, StoreError> {
        let mut inner = self.inner.write().await;

        if let Some(key) = payment.idempotency_key() {
            if let Some(existing) = inner
                .idempotency
                .get(key)
                .and_then(|id| inner.payments.get(id))
            {
                tracing::debug!(payment_id = %existing.id(), "idempotency key already bound");
                return Ok(existing.clone());
            }
        }

        let id = PaymentId::new_v7();
        if inner.payments.contains_key(&id) {
            return Err(StoreError::IdGeneration(format!("duplicate id {id}")));
        }

        let key = payment.idempotency_key().map(str::to_string);
        let stored = payment.into_payment(id);
        inner.payments.insert(id, stored.clone());
        if let Some(key) = key {
            inner.idempotency.insert(key, id);
        }

        Ok(stored)
    }
}

impl PaymentStore for InMemoryPaymentStore {
    fn add(
        &self,
        payment: NewPayment,
    ) -> Pin<Box<dyn Future<Output = Result<Payment, StoreError>> + Send + '_>> {
        Box::pin(self.add_inner(payment))
    }

    fn get(
        &self,
        id: PaymentId,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Payment>, StoreError>> + Send + '_>> {
        Box::pin(async move { Ok(self.inner.read().await.payments.get(&id).cloned()) })
    }

    fn find_by_idempotency_key(
        &self,
        key: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Payment>, StoreError>> + Send + '_>> {
        let key = key.to_string();
        Box::pin(async move {
            if key.is_empty() {
                return Ok(None);
            }
            let inner = self.inner.read().await;
            Ok(inner
                .idempotency
                .get(&key)
                .and_then(|id| inner.payments.get(id))
                .cloned())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::{PaymentRequest, PaymentStatus};

    fn candidate(key: Option<&str>, status: PaymentStatus) -> NewPayment {
        let req = PaymentRequest {
            card_number: "4111111111111111".into(),
            expiry_month: 12,
            expiry_year: 2050,
            currency: "EUR".into(),
            amount: 250,
            cvv: "123".into(),
            idempotency_key: key.map(str::to_string),
        };
        NewPayment::from_request(&req).unwrap().with_status(status)
    }

    #[tokio::test]
    async fn add_assigns_id_and_get_returns_record() {
        let store = InMemoryPaymentStore::new();
        let stored = store.add(candidate(None, PaymentStatus::Authorized)).await.unwrap();

        let got = store.get(stored.id()).await.unwrap().unwrap();
        assert_eq!(got, stored);
        assert_eq!(got.amount().value(), 250);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn get_unknown_is_none() {
        let store = InMemoryPaymentStore::new();
        assert!(store.get(PaymentId::new_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn same_key_returns_first_record() {
        let store = InMemoryPaymentStore::new();
        let first = store
            .add(candidate(Some("key-1"), PaymentStatus::Authorized))
            .await
            .unwrap();
        let second = store
            .add(candidate(Some("key-1"), PaymentStatus::Declined))
            .await
            .unwrap();

        assert_eq!(second.id(), first.id());
        assert_eq!(second.status(), PaymentStatus::Authorized);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn empty_key_is_not_deduplicated() {
        let store = InMemoryPaymentStore::new();
        let a = store.add(candidate(Some(""), PaymentStatus::Authorized)).await.unwrap();
        let b = store.add(candidate(Some(""), PaymentStatus::Authorized)).await.unwrap();

        assert_ne!(a.id(), b.id());
        assert!(store.find_by_idempotency_key("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn ids_are_v7() {
        let store = InMemoryPaymentStore::new();
        let a = store.add(candidate(None, PaymentStatus::Authorized)).await.unwrap();
        assert_eq!(a.id().as_uuid().get_version_num(), 7);
    }
}
