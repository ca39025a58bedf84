//! Money arithmetic that re-quantizes to the cent after every step.
//!
//! Binary floats cannot represent most decimal amounts exactly, so each
//! operation rounds its result (nearest, 2 decimals) before it can feed
//! the next one. A long chain such as summing product prices therefore
//! never accumulates sub-cent drift.

use crate::currency::{round_money, CurrencyFloat};
use crate::types::CalculationError;

#[inline]
pub fn normalize(amount: CurrencyFloat) -> CurrencyFloat {
    round_money(amount)
}

#[inline]
pub fn add(a: CurrencyFloat, b: CurrencyFloat) -> CurrencyFloat {
    normalize(a + b)
}

#[inline]
pub fn subtract(a: CurrencyFloat, b: CurrencyFloat) -> CurrencyFloat {
    normalize(a - b)
}

#[inline]
pub fn multiply(a: CurrencyFloat, b: CurrencyFloat) -> CurrencyFloat {
    normalize(a * b)
}

/// Callers are expected to reject a zero divisor beforehand;
/// it is still reported rather than producing an infinity.
pub fn divide(a: CurrencyFloat, b: CurrencyFloat) -> Result<CurrencyFloat, CalculationError> {
    if b == 0.0 {
        return Err(CalculationError::DivisionByZero { dividend: a });
    }
    Ok(normalize(a / b))
}

/// Left fold of `add`, starting from zero.
pub fn sum<I: IntoIterator<Item = CurrencyFloat>>(amounts: I) -> CurrencyFloat {
    amounts.into_iter().fold(0.0, add)
}
