use crate::types::{CalculationRequest, CurrencyFloat, Payment, PaymentCurrency, RequestRecord};

pub const PRICE_SEPARATOR: &str = ";";

/// Parse a number typed into a form field.
/// Anything that is not a finite number becomes NaN so it can't pass for a real amount.
pub fn parse_amount(raw: &str) -> CurrencyFloat {
    match raw.trim().parse::<CurrencyFloat>() {
        Ok(amount) if amount.is_finite() => amount,
        Ok(_) | Err(_) => CurrencyFloat::NAN,
    }
}

/// Split a `;`-separated price list. A blank list means no products.
pub fn parse_prices(raw: &str) -> Vec<CurrencyFloat> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(PRICE_SEPARATOR).map(parse_amount).collect()
}

pub fn format_prices(prices: &[CurrencyFloat]) -> String {
    prices
        .iter()
        .map(|price| format!("{:.2}", price))
        .collect::<Vec<_>>()
        .join(PRICE_SEPARATOR)
}

impl From<RequestRecord> for CalculationRequest {
    fn from(r: RequestRecord) -> Self {
        let payment = match r.payment_currency {
            Some(PaymentCurrency::Foreign) => Payment::Foreign {
                tendered: r
                    .tendered
                    .as_deref()
                    .map(parse_amount)
                    .unwrap_or(CurrencyFloat::NAN),
            },
            // NOTE: A missing currency column means the customer pays locally
            Some(PaymentCurrency::Local) | None => Payment::Local,
        };

        Self {
            exchange_rate: parse_amount(&r.exchange_rate),
            total_amount: parse_amount(&r.total_amount),
            payment,
            product_prices: parse_prices(&r.prices),
        }
    }
}

// Convert back to a raw record for the sake of
// writing generated requests as CSV

impl From<CalculationRequest> for RequestRecord {
    fn from(r: CalculationRequest) -> Self {
        let (payment_currency, tendered) = match r.payment {
            Payment::Local => (PaymentCurrency::Local, None),
            Payment::Foreign { tendered } => {
                (PaymentCurrency::Foreign, Some(format!("{:.2}", tendered)))
            }
        };

        Self {
            exchange_rate: format!("{:.2}", r.exchange_rate),
            total_amount: format!("{:.2}", r.total_amount),
            payment_currency: Some(payment_currency),
            tendered,
            prices: format_prices(&r.product_prices),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_amount, parse_prices};
    use crate::types::{CalculationRequest, Payment, PaymentCurrency, RequestRecord};

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("120"), 120.0);
        assert_eq!(parse_amount(" 250.50 "), 250.5);
        assert_eq!(parse_amount("-3"), -3.0);
        assert!(parse_amount("").is_nan());
        assert!(parse_amount("abc").is_nan());
        assert!(parse_amount("12abc").is_nan());
        assert!(parse_amount("inf").is_nan());
        assert!(parse_amount("NaN").is_nan());
    }

    #[test]
    fn test_parse_prices() {
        assert_eq!(parse_prices("100;250.50; 49.99"), vec![100.0, 250.5, 49.99]);
        assert_eq!(parse_prices("  "), Vec::<f64>::new());

        let prices = parse_prices("1;;2");
        assert_eq!(prices.len(), 3);
        assert!(prices[1].is_nan());
    }

    #[test]
    fn test_foreign_record_to_request() {
        let record = RequestRecord {
            exchange_rate: "120".into(),
            total_amount: "1000".into(),
            payment_currency: Some(PaymentCurrency::Foreign),
            tendered: Some("10".into()),
            prices: "600;300".into(),
        };

        let request = CalculationRequest {
            exchange_rate: 120.0,
            total_amount: 1000.0,
            payment: Payment::Foreign { tendered: 10.0 },
            product_prices: vec![600.0, 300.0],
        };

        assert_eq!(request, record.into());
    }

    #[test]
    fn test_foreign_record_without_tendered() {
        let record = RequestRecord {
            exchange_rate: "120".into(),
            total_amount: "1000".into(),
            payment_currency: Some(PaymentCurrency::Foreign),
            tendered: None,
            prices: "600".into(),
        };

        let request: CalculationRequest = record.into();
        match request.payment {
            Payment::Foreign { tendered } => assert!(tendered.is_nan()),
            Payment::Local => panic!("expected foreign payment"),
        }
    }

    #[test]
    fn test_request_to_record() {
        let request = CalculationRequest {
            exchange_rate: 120.0,
            total_amount: 1000.0,
            payment: Payment::Local,
            product_prices: vec![600.0, 299.5],
        };

        let record = RequestRecord {
            exchange_rate: "120.00".into(),
            total_amount: "1000.00".into(),
            payment_currency: Some(PaymentCurrency::Local),
            tendered: None,
            prices: "600.00;299.50".into(),
        };

        assert_eq!(record, request.into());
    }
}
