use crate::handlers::handle_record;
use crate::types::{CalculationError, CalculationResult, RequestRecord};

/// Given a set of raw requests, test that each one
/// calculates to its expected result or error.
pub fn run_test_scenario(
    requests: Vec<RequestRecord>,
    expected_outcomes: Vec<Result<CalculationResult, CalculationError>>,
) {
    let actual_outcomes: Vec<_> = requests.into_iter().map(handle_record).collect();

    assert_eq!(expected_outcomes, actual_outcomes);
}

/// Build a raw request the way a form would submit it.
pub fn request(
    exchange_rate: &str,
    total_amount: &str,
    tendered: Option<&str>,
    prices: &str,
) -> RequestRecord {
    use crate::types::PaymentCurrency;

    RequestRecord {
        exchange_rate: exchange_rate.to_string(),
        total_amount: total_amount.to_string(),
        payment_currency: Some(if tendered.is_some() {
            PaymentCurrency::Foreign
        } else {
            PaymentCurrency::Local
        }),
        tendered: tendered.map(str::to_string),
        prices: prices.to_string(),
    }
}
