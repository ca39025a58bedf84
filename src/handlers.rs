use crate::arithmetic;
use crate::currency::{ceil_money, floor_money};
use crate::types::{CalculationError, CalculationRequest, CalculationResult, CurrencyFloat};
use crate::types::{Payment, RequestRecord};
use crate::validate;

/// Foreign-currency figures: (amount due, change in foreign, change in local)
fn handle_foreign_payment(
    tendered: CurrencyFloat,
    total_amount: CurrencyFloat,
    exchange_rate: CurrencyFloat,
) -> Result<(CurrencyFloat, CurrencyFloat, CurrencyFloat), CalculationError> {
    let foreign_total = arithmetic::divide(total_amount, exchange_rate)?;
    validate::validate_foreign_payment(tendered, foreign_total)?;

    // Change is rounded up in the customer's favour, in both currencies
    let foreign_change = ceil_money(arithmetic::subtract(tendered, foreign_total));
    let local_change = ceil_money(arithmetic::multiply(foreign_change, exchange_rate));

    log::debug!(
        "foreign payment: due {} tendered {} change {} ({} local)",
        foreign_total,
        tendered,
        foreign_change,
        local_change
    );

    Ok((foreign_total, foreign_change, local_change))
}

/// Run one submission through validation and the money arithmetic.
pub fn handle_calculation(
    request: CalculationRequest,
) -> Result<CalculationResult, CalculationError> {
    let exchange_rate = arithmetic::normalize(request.exchange_rate);
    let total_amount = arithmetic::normalize(request.total_amount);

    validate::validate_prices(&request.product_prices)?;
    let original_total = arithmetic::sum(request.product_prices.iter().copied());

    validate::validate_required_fields(&request)?;
    validate::validate_exchange_rate(exchange_rate)?;
    validate::validate_original_total(original_total, total_amount)?;

    let mut result = CalculationResult {
        original_total,
        foreign_total: None,
        foreign_change: None,
        local_change: None,
        manager_profit: 0.0,
    };

    if let Payment::Foreign { tendered } = request.payment {
        let tendered = arithmetic::normalize(tendered);
        let (foreign_total, foreign_change, local_change) =
            handle_foreign_payment(tendered, total_amount, exchange_rate)?;
        result.foreign_total = Some(foreign_total);
        result.foreign_change = Some(foreign_change);
        result.local_change = Some(local_change);
    }

    // NOTE: original_total <= total_amount here, so the margin is floored
    // towards the larger magnitude before taking its absolute value
    result.manager_profit = floor_money(arithmetic::subtract(original_total, total_amount)).abs();

    log::debug!(
        "original total {} due {} profit {}",
        original_total,
        total_amount,
        result.manager_profit
    );

    validate::validate_figures(&result)?;

    Ok(result)
}

/// Parse a raw record and calculate it.
pub fn handle_record(record: RequestRecord) -> Result<CalculationResult, CalculationError> {
    handle_calculation(record.into())
}
