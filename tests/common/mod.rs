#![allow(dead_code)]

use card_gateway::domain::authorizer::{AuthorizationRequest, AuthorizationResponse, Authorizer};
use card_gateway::domain::error::{AuthorizationError, StoreError};
use card_gateway::domain::payment::{NewPayment, Payment, PaymentId, PaymentRequest};
use card_gateway::domain::store::PaymentStore;
use card_gateway::infra::memory::payment_store::InMemoryPaymentStore;
use card_gateway::services::payment_service::PaymentService;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// The request used across the suite; expiry far enough out to never fail.
pub fn valid_request() -> PaymentRequest {
    PaymentRequest {
        card_number: "4111111111111111".to_string(),
        expiry_month: 12,
        expiry_year: 2050,
        currency: "USD".to_string(),
        amount: 1000,
        cvv: "123".to_string(),
        idempotency_key: None,
    }
}

pub fn with_key(key: &str) -> PaymentRequest {
    PaymentRequest {
        idempotency_key: Some(key.to_string()),
        ..valid_request()
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Outcome {
    Authorized,
    Declined,
    Rejected,
    Unavailable,
    Internal,
    Unexpected(u16),
    Panic,
}

/// In-process bank: answers with a fixed outcome and counts calls.
pub struct StubAuthorizer {
    outcome: Outcome,
    delay: Duration,
    calls: AtomicUsize,
    last: Mutex<Option<AuthorizationRequest>>,
}

impl StubAuthorizer {
    pub fn new(outcome: Outcome) -> Arc<Self> {
        Self::with_delay(outcome, Duration::ZERO)
    }

    pub fn with_delay(outcome: Outcome, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            delay,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<AuthorizationRequest> {
        self.last.lock().unwrap().clone()
    }
}

impl Authorizer for StubAuthorizer {
    fn authorize(
        &self,
        req: &AuthorizationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<AuthorizationResponse, AuthorizationError>> + Send + '_>>
    {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(req.clone());
        Box::pin(async move {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            match self.outcome {
                Outcome::Authorized => Ok(AuthorizationResponse {
                    authorized: true,
                    authorization_code: "AUTH123".to_string(),
                }),
                Outcome::Declined => Ok(AuthorizationResponse {
                    authorized: false,
                    authorization_code: String::new(),
                }),
                Outcome::Rejected => Err(AuthorizationError::Rejected("card rejected".into())),
                Outcome::Unavailable => Err(AuthorizationError::Unavailable),
                Outcome::Internal => Err(AuthorizationError::Internal("boom".into())),
                Outcome::Unexpected(code) => Err(AuthorizationError::Unexpected(code)),
                Outcome::Panic => panic!("bank stub exploded"),
            }
        })
    }
}

/// Store whose writes always fail; reads see nothing.
pub struct FailingStore;

impl PaymentStore for FailingStore {
    fn add(
        &self,
        _payment: NewPayment,
    ) -> Pin<Box<dyn Future<Output = Result<Payment, StoreError>> + Send + '_>> {
        Box::pin(async { Err(StoreError::Backend("disk on fire".into())) })
    }

    fn get(
        &self,
        _id: PaymentId,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Payment>, StoreError>> + Send + '_>> {
        Box::pin(async { Ok(None) })
    }

    fn find_by_idempotency_key(
        &self,
        _key: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Payment>, StoreError>> + Send + '_>> {
        Box::pin(async { Ok(None) })
    }
}

pub fn service_with(
    outcome: Outcome,
) -> (PaymentService, InMemoryPaymentStore, Arc<StubAuthorizer>) {
    let store = InMemoryPaymentStore::new();
    let bank = StubAuthorizer::new(outcome);
    let service = PaymentService::new(Arc::new(store.clone()), bank.clone());
    (service, store, bank)
}
