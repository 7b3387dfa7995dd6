use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Prices are persisted as integer cents
pub const PRICE_SCALE: u32 = 2;

/// True when the price is non-negative with at most two fractional digits
pub fn is_valid_price(price: &Decimal) -> bool {
    !price.is_sign_negative() && price.normalize().scale() <= PRICE_SCALE
}

/// Convert a price to cents; `None` for invalid or out-of-range prices
pub fn price_to_cents(price: &Decimal) -> Option<i64> {
    if !is_valid_price(price) {
        return None;
    }
    (price * Decimal::ONE_HUNDRED).trunc().to_i64()
}

pub fn cents_to_price(cents: i64) -> Decimal {
    Decimal::new(cents, PRICE_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_price_scale() {
        assert!(is_valid_price(&Decimal::from_str("28").unwrap()));
        assert!(is_valid_price(&Decimal::from_str("8.50").unwrap()));
        // trailing zeros do not count
        assert!(is_valid_price(&Decimal::from_str("8.5000").unwrap()));
        assert!(!is_valid_price(&Decimal::from_str("8.505").unwrap()));
        assert!(!is_valid_price(&Decimal::from_str("-1").unwrap()));
        assert!(is_valid_price(&Decimal::ZERO));
    }

    #[test]
    fn test_cents_conversion() {
        let price = Decimal::from_str("28.0").unwrap();
        assert_eq!(price_to_cents(&price), Some(2800));
        assert_eq!(cents_to_price(2800), price);
        assert_eq!(price_to_cents(&Decimal::from_str("0.07").unwrap()), Some(7));
        assert_eq!(price_to_cents(&Decimal::from_str("1.001").unwrap()), None);
        assert_eq!(cents_to_price(850).to_string(), "8.50");
    }
}
