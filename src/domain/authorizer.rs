use {
    super::error::AuthorizationError,
    super::payment::PaymentRequest,
    serde::{Deserialize, Serialize},
    std::{fmt, future::Future, pin::Pin},
};

/// What the bank receives. Amount stays in minor units.
#[derive(Clone, Serialize)]
pub struct AuthorizationRequest {
    pub card_number: String,
    pub expiry_date: String,
    pub currency: String,
    pub amount: i64,
    pub cvv: String,
}

impl From<&PaymentRequest> for AuthorizationRequest {
    fn from(req: &PaymentRequest) -> Self {
        Self {
            card_number: req.card_number.clone(),
            expiry_date: req.expiry_date(),
            currency: req.currency.clone(),
            amount: req.amount,
            cvv: req.cvv.clone(),
        }
    }
}

impl fmt::Debug for AuthorizationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizationRequest")
            .field("expiry_date", &self.expiry_date)
            .field("currency", &self.currency)
            .field("amount", &self.amount)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationResponse {
    pub authorized: bool,
    pub authorization_code: String,
}

/// The external decision maker. One call per invocation, no retries.
pub trait Authorizer: Send + Sync {
    fn authorize(
        &self,
        req: &AuthorizationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<AuthorizationResponse, AuthorizationError>> + Send + '_>>;
}
