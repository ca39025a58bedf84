// Money only ever needs 2 decimals, but f32 loses cents above ~100k
pub type CurrencyFloat = f64;

/// Number of decimal places kept for every monetary figure.
pub const MONEY_DECIMALS: u8 = 2;

/// How to pick a neighbouring multiple of `10^-precision`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingPolicy {
    /// Closest multiple, ties away from zero.
    Nearest,
    /// Smallest multiple that is `>=` the value.
    Ceiling,
    /// Largest multiple that is `<=` the value.
    Floor,
}

/// Round `amount` to `precision` decimal places.
///
/// Rounding works on the binary value of `amount`, so `1.005` (stored as
/// `1.00499999...`) rounds to `1.0` under `Nearest`.
/// NaN and infinities come back unchanged, and so do finite values too large
/// to scale: those are already whole numbers.
pub fn round_currency(
    amount: CurrencyFloat,
    policy: RoundingPolicy,
    precision: u8,
) -> CurrencyFloat {
    let multiplier: CurrencyFloat = 10.0f64.powi(precision.into());
    let scaled = amount * multiplier;
    if !scaled.is_finite() {
        return amount;
    }
    let rounded = match policy {
        RoundingPolicy::Nearest => scaled.round(),
        RoundingPolicy::Ceiling => scaled.ceil(),
        RoundingPolicy::Floor => scaled.floor(),
    };
    rounded / multiplier
}

pub fn round_money(amount: CurrencyFloat) -> CurrencyFloat {
    round_currency(amount, RoundingPolicy::Nearest, MONEY_DECIMALS)
}

pub fn ceil_money(amount: CurrencyFloat) -> CurrencyFloat {
    round_currency(amount, RoundingPolicy::Ceiling, MONEY_DECIMALS)
}

pub fn floor_money(amount: CurrencyFloat) -> CurrencyFloat {
    round_currency(amount, RoundingPolicy::Floor, MONEY_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::{ceil_money, floor_money, round_currency, round_money, RoundingPolicy};

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(2.345), 2.35);
        assert_eq!(round_money(1.00003), 1.0);
        assert_eq!(round_money(0.005), 0.01);
        assert_eq!(round_money(0.004), 0.0);
        assert_eq!(round_money(-2.345), -2.35);
    }

    #[test]
    fn test_nearest_uses_binary_value() {
        // 1.005 is really 1.00499999999999989...
        assert_eq!(round_money(1.005), 1.0);
    }

    #[test]
    fn test_ceil_money() {
        assert_eq!(ceil_money(1.671), 1.68);
        assert_eq!(ceil_money(1.67), 1.67);
        assert_eq!(ceil_money(-1.679), -1.67);
    }

    #[test]
    fn test_floor_money() {
        assert_eq!(floor_money(1.679), 1.67);
        assert_eq!(floor_money(-0.491), -0.5);
        assert_eq!(floor_money(3.0), 3.0);
    }

    #[test]
    fn test_other_precisions() {
        assert_eq!(round_currency(2.5, RoundingPolicy::Nearest, 0), 3.0);
        assert_eq!(round_currency(-2.5, RoundingPolicy::Nearest, 0), -3.0);
        assert_eq!(round_currency(0.00005, RoundingPolicy::Nearest, 4), 0.0001);
        assert_eq!(round_currency(1.2341, RoundingPolicy::Ceiling, 3), 1.235);
        assert_eq!(round_currency(1.2349, RoundingPolicy::Floor, 3), 1.234);
    }

    #[test]
    fn test_huge_values_stay_finite() {
        assert_eq!(round_money(1e307), 1e307);
        assert_eq!(ceil_money(f64::MAX), f64::MAX);
        assert_eq!(floor_money(-f64::MAX), -f64::MAX);
        assert_eq!(round_currency(1e300, RoundingPolicy::Nearest, 10), 1e300);
    }

    #[test]
    fn test_non_finite_propagates() {
        assert!(round_money(f64::NAN).is_nan());
        assert!(ceil_money(f64::NAN).is_nan());
        assert!(floor_money(f64::NAN).is_nan());
        assert_eq!(round_money(f64::INFINITY), f64::INFINITY);
        assert_eq!(floor_money(f64::NEG_INFINITY), f64::NEG_INFINITY);
    }
}
