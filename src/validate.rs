use crate::arithmetic;
use crate::types::{CalculationError, CalculationRequest, CalculationResult, CurrencyFloat};

pub fn validate_prices(prices: &[CurrencyFloat]) -> Result<(), CalculationError> {
    // NOTE: Report only the first bad price, the way the form stops at it
    match prices.iter().position(|price| !price.is_finite()) {
        Some(index) => Err(CalculationError::InvalidPrice { product: index + 1 }),
        None => Ok(()),
    }
}

pub fn validate_required_fields(request: &CalculationRequest) -> Result<(), CalculationError> {
    if !request.exchange_rate.is_finite() {
        return Err(CalculationError::MissingField {
            field: "exchange rate",
        });
    }
    if !request.total_amount.is_finite() {
        return Err(CalculationError::MissingField {
            field: "total amount",
        });
    }
    if request.product_prices.is_empty() {
        return Err(CalculationError::MissingField {
            field: "product prices",
        });
    }
    Ok(())
}

pub fn validate_exchange_rate(rate: CurrencyFloat) -> Result<(), CalculationError> {
    // A rate that normalizes to zero would make `divide` fail later on
    if rate > 0.0 {
        Ok(())
    } else {
        Err(CalculationError::NonPositiveExchangeRate { rate })
    }
}

pub fn validate_original_total(
    original: CurrencyFloat,
    amount_due: CurrencyFloat,
) -> Result<(), CalculationError> {
    if original > amount_due {
        Err(CalculationError::OriginalTotalExceedsAmountDue {
            original,
            amount_due,
            difference: arithmetic::subtract(original, amount_due),
        })
    } else {
        Ok(())
    }
}

pub fn validate_foreign_payment(
    tendered: CurrencyFloat,
    required: CurrencyFloat,
) -> Result<(), CalculationError> {
    if !tendered.is_finite() {
        return Err(CalculationError::MissingTenderedAmount);
    }
    if tendered < required {
        return Err(CalculationError::InsufficientPayment {
            tendered,
            required,
            shortfall: arithmetic::subtract(required, tendered),
        });
    }
    Ok(())
}

/// Inputs are finite, but products and differences of huge ones may not be
pub fn validate_figures(result: &CalculationResult) -> Result<(), CalculationError> {
    let figures = [
        ("original total", Some(result.original_total)),
        ("foreign total", result.foreign_total),
        ("foreign change", result.foreign_change),
        ("local change", result.local_change),
        ("manager profit", Some(result.manager_profit)),
    ];
    for (figure, amount) in figures.iter() {
        if let Some(amount) = amount {
            if !amount.is_finite() {
                return Err(CalculationError::AmountOutOfRange { figure: *figure });
            }
        }
    }
    Ok(())
}
