use {
    super::error::ValidationError,
    super::money::{Currency, MinorUnits},
    serde::{Deserialize, Serialize},
    std::fmt,
    thiserror::Error,
};

pub use super::id::PaymentId;

#[derive(Debug, Error)]
#[error("unknown payment status: {0}")]
pub struct UnknownStatus(pub String);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Authorized,
    Declined,
    Rejected,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Authorized => "authorized",
            Self::Declined => "declined",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// A payment leaves Pending exactly once and never moves again.
    pub fn can_transition_to(&self, next: &PaymentStatus) -> bool {
        matches!(self, Self::Pending) && next.is_terminal()
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for PaymentStatus {
    type Error = UnknownStatus;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "pending" => Ok(Self::Pending),
            "authorized" => Ok(Self::Authorized),
            "declined" => Ok(Self::Declined),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Caller-supplied create request. Holds full card data, so it is never
/// stored and its `Debug` output is redacted.
#[derive(Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub card_number: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub currency: String,
    pub amount: i64,
    pub cvv: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

impl PaymentRequest {
    /// The idempotency key, ignoring empty strings.
    pub fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref().filter(|k| !k.is_empty())
    }

    /// `MM/YYYY`, the format the bank expects.
    pub fn expiry_date(&self) -> String {
        format!("{:02}/{}", self.expiry_month, self.expiry_year)
    }
}

impl fmt::Debug for PaymentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentRequest")
            .field("card_number", &"<redacted>")
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("currency", &self.currency)
            .field("amount", &self.amount)
            .field("cvv", &"<redacted>")
            .field("idempotency_key", &self.idempotency_key)
            .finish()
    }
}

/// Stored payment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    id: PaymentId,
    status: PaymentStatus,
    card_number_last_four: String,
    expiry_month: u32,
    expiry_year: i32,
    currency: Currency,
    amount: MinorUnits,
    #[serde(skip)]
    idempotency_key: Option<String>,
}

impl Payment {
    pub fn id(&self) -> PaymentId {
        self.id
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn card_number_last_four(&self) -> &str {
        &self.card_number_last_four
    }

    pub fn expiry_month(&self) -> u32 {
        self.expiry_month
    }

    pub fn expiry_year(&self) -> i32 {
        self.expiry_year
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn amount(&self) -> MinorUnits {
        self.amount
    }

    pub fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref()
    }
}

/// Candidate record. Built as `Pending` before authorization, resolved to
/// the bank's outcome, then handed to the store for an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    status: PaymentStatus,
    card_number_last_four: String,
    expiry_month: u32,
    expiry_year: i32,
    currency: Currency,
    amount: MinorUnits,
    idempotency_key: Option<String>,
}

impl NewPayment {
    /// Keeps only the last four card digits. Expects a request that already
    /// passed validation; anything else is reported against its field.
    pub fn from_request(req: &PaymentRequest) -> Result<Self, ValidationError> {
        let card_number_last_four = req
            .card_number
            .len()
            .checked_sub(4)
            .and_then(|start| req.card_number.get(start..))
            .ok_or_else(|| ValidationError::new("card_number", "card number is too short"))?
            .to_string();
        let expiry_month = u32::try_from(req.expiry_month)
            .map_err(|_| ValidationError::new("expiry_month", "expiry month must be between 1 and 12"))?;
        let currency = Currency::parse(&req.currency)
            .ok_or_else(|| ValidationError::new("currency", "currency must be one of: USD, EUR, BRL"))?;
        let amount = MinorUnits::new(req.amount)
            .ok_or_else(|| ValidationError::new("amount", "amount must be greater than zero"))?;

        Ok(Self {
            status: PaymentStatus::Pending,
            card_number_last_four,
            expiry_month,
            expiry_year: req.expiry_year,
            currency,
            amount,
            idempotency_key: req.idempotency_key().map(str::to_string),
        })
    }

    pub fn with_status(self, status: PaymentStatus) -> Self {
        Self { status, ..self }
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn card_number_last_four(&self) -> &str {
        &self.card_number_last_four
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn amount(&self) -> MinorUnits {
        self.amount
    }

    pub fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Binds the candidate to its id. Only the store calls this.
    pub fn into_payment(self, id: PaymentId) -> Payment {
        Payment {
            id,
            status: self.status,
            card_number_last_four: self.card_number_last_four,
            expiry_month: self.expiry_month,
            expiry_year: self.expiry_year,
            currency: self.currency,
            amount: self.amount,
            idempotency_key: self.idempotency_key,
        }
    }
}
