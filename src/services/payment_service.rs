use {
    super::idempotency::KeyedLocks,
    crate::domain::{
        authorizer::{AuthorizationRequest, Authorizer},
        error::{AuthorizationError, PaymentError},
        payment::{NewPayment, Payment, PaymentId, PaymentRequest, PaymentStatus},
        store::PaymentStore,
        validation,
    },
    std::sync::Arc,
};

/// Create and read use cases: validate, authorize with the bank, derive the
/// status, persist.
#[derive(Clone)]
pub struct PaymentService {
    store: Arc<dyn PaymentStore>,
    authorizer: Arc<dyn Authorizer>,
    key_locks: KeyedLocks,
}

impl PaymentService {
    pub fn new(store: Arc<dyn PaymentStore>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self {
            store,
            authorizer,
            key_locks: KeyedLocks::new(),
        }
    }

    /// Requests that reuse an idempotency key get the original payment back
    /// without a second authorization. The key stays locked from the lookup
    /// until the insert, so concurrent duplicates wait for the first one.
    pub async fn create(&self, req: PaymentRequest) -> Result<Payment, PaymentError> {
        validation::validate(&req)?;
        let candidate = NewPayment::from_request(&req)?;

        let _key_guard = match req.idempotency_key() {
            Some(key) => {
                let guard = self.key_locks.lock(key).await;
                if let Some(existing) = self.store.find_by_idempotency_key(key).await? {
                    tracing::info!(
                        payment_id = %existing.id(),
                        status = %existing.status(),
                        "idempotent replay, skipping authorization"
                    );
                    return Ok(existing);
                }
                Some(guard)
            }
            None => None,
        };

        let status = self.authorize(&req).await?;

        let payment = self.store.add(candidate.with_status(status)).await.map_err(|e| {
            // No compensating reversal exists; the bank may already hold an
            // authorization for this request.
            tracing::error!(error = %e, status = %status, "payment authorized but not persisted");
            PaymentError::from(e)
        })?;

        if payment.status() != PaymentStatus::Authorized {
            tracing::warn!(
                payment_id = %payment.id(),
                status = %payment.status(),
                "payment not authorized"
            );
        } else {
            tracing::info!(payment_id = %payment.id(), "payment authorized");
        }

        Ok(payment)
    }

    /// Unknown ids and ids that are not UUIDs are both `NotFound`.
    pub async fn get(&self, id: &str) -> Result<Payment, PaymentError> {
        let Some(id) = PaymentId::parse(id) else {
            return Err(PaymentError::NotFound);
        };
        self.store.get(id).await?.ok_or(PaymentError::NotFound)
    }

    /// Maps the bank outcome to a terminal status. Only a business rejection
    /// still produces a payment; every other failure aborts the create.
    async fn authorize(&self, req: &PaymentRequest) -> Result<PaymentStatus, PaymentError> {
        let auth_req = AuthorizationRequest::from(req);

        match self.authorizer.authorize(&auth_req).await {
            Ok(resp) if resp.authorized => {
                tracing::debug!(authorization_code = %resp.authorization_code, "bank authorized");
                Ok(PaymentStatus::Authorized)
            }
            Ok(_) => Ok(PaymentStatus::Declined),
            Err(AuthorizationError::Rejected(reason)) => {
                tracing::warn!(reason = %reason, "bank rejected authorization request");
                Ok(PaymentStatus::Rejected)
            }
            Err(e @ AuthorizationError::Unavailable) => {
                tracing::warn!(error = %e, "bank unavailable, nothing recorded");
                Err(e.into())
            }
            Err(e @ (AuthorizationError::Internal(_) | AuthorizationError::Unexpected(_))) => {
                tracing::error!(error = %e, "authorization failed, nothing recorded");
                Err(e.into())
            }
        }
    }
}
