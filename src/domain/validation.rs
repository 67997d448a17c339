use {
    super::error::ValidationError,
    super::money::Currency,
    super::payment::PaymentRequest,
    chrono::{DateTime, Datelike, Utc},
};

const CARD_NUMBER_LEN: std::ops::RangeInclusive<usize> = 14..=19;
const CVV_LEN: std::ops::RangeInclusive<usize> = 3..=4;

/// Checks a create request against the current UTC month.
pub fn validate(req: &PaymentRequest) -> Result<(), ValidationError> {
    validate_at(req, Utc::now())
}

/// Rules run in a fixed order and the first failure wins.
pub fn validate_at(req: &PaymentRequest, now: DateTime<Utc>) -> Result<(), ValidationError> {
    if !CARD_NUMBER_LEN.contains(&req.card_number.len()) || !is_digits_only(&req.card_number) {
        return Err(ValidationError::new(
            "card_number",
            "card number must contain between 14 and 19 numeric digits",
        ));
    }

    if !(1..=12).contains(&req.expiry_month) {
        return Err(ValidationError::new(
            "expiry_month",
            "expiry month must be between 1 and 12",
        ));
    }

    // A card expiring this month is still usable.
    let current = (now.year(), now.month() as i32);
    if (req.expiry_year, req.expiry_month) < current {
        return Err(ValidationError::new(
            "expiry_date",
            "expiry date must be in the future",
        ));
    }

    if Currency::parse(&req.currency).is_none() {
        return Err(ValidationError::new(
            "currency",
            "currency must be one of: USD, EUR, BRL",
        ));
    }

    if req.amount <= 0 {
        return Err(ValidationError::new(
            "amount",
            "amount must be greater than zero",
        ));
    }

    if !CVV_LEN.contains(&req.cvv.len()) || !is_digits_only(&req.cvv) {
        return Err(ValidationError::new(
            "cvv",
            "cvv must contain 3 or 4 numeric digits",
        ));
    }

    Ok(())
}

fn is_digits_only(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
