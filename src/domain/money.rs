use {
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Currencies the gateway accepts. Codes are ISO-4217 and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Brl,
}

impl Currency {
    pub const SUPPORTED: [Currency; 3] = [Self::Usd, Self::Eur, Self::Brl];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Brl => "BRL",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        Self::SUPPORTED.into_iter().find(|c| c.as_str() == code)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Amount in minor units of its currency (cents for USD). Always positive
/// once it reaches a stored payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorUnits(i64);

impl MinorUnits {
    pub fn new(amount: i64) -> Option<Self> {
        (amount > 0).then_some(Self(amount))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
