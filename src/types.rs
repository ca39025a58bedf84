use serde::{Deserialize, Serialize, Serializer};
use std::error::Error;
use std::fmt::{self, Display};

pub use crate::currency::CurrencyFloat;

/// Position of a submission within a batch, starting at 1
pub type RequestId = u32;

/// Which currency the customer pays in
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentCurrency {
    Local,
    Foreign,
}

/// A single row in the input CSV, exactly as typed into the form
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RequestRecord {
    pub exchange_rate: String,
    pub total_amount: String,
    pub payment_currency: Option<PaymentCurrency>,
    pub tendered: Option<String>,
    /// Product prices separated by `;`
    pub prices: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payment {
    Local,
    Foreign { tendered: CurrencyFloat },
}

/// A parsed submission. Unparsable numbers are carried as NaN
/// and rejected during validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRequest {
    /// Local currency units per unit of foreign currency
    pub exchange_rate: CurrencyFloat,
    /// Total amount due, in local currency
    pub total_amount: CurrencyFloat,
    pub payment: Payment,
    /// Original product prices, in local currency
    pub product_prices: Vec<CurrencyFloat>,
}

/// Figures produced for one submission
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResult {
    /// Sum of the product prices
    pub original_total: CurrencyFloat,
    /// Amount due expressed in foreign currency
    pub foreign_total: Option<CurrencyFloat>,
    /// Change in foreign currency: tendered minus `foreign_total`
    pub foreign_change: Option<CurrencyFloat>,
    /// `foreign_change` converted back to local currency
    pub local_change: Option<CurrencyFloat>,
    /// Magnitude of amount due minus original total
    pub manager_profit: CurrencyFloat,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Ok,
    Error,
}

/// Write figures with exactly two decimals, like the display lines do
fn serialize_money<S: Serializer>(
    amount: &Option<CurrencyFloat>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match amount {
        Some(amount) => serializer.serialize_str(&format!("{:.2}", amount)),
        None => serializer.serialize_none(),
    }
}

/// A single row in the output CSV
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct ResultRecord {
    pub request: RequestId,
    pub status: ResultStatus,
    #[serde(serialize_with = "serialize_money")]
    pub original_total: Option<CurrencyFloat>,
    #[serde(serialize_with = "serialize_money")]
    pub foreign_total: Option<CurrencyFloat>,
    #[serde(serialize_with = "serialize_money")]
    pub foreign_change: Option<CurrencyFloat>,
    #[serde(serialize_with = "serialize_money")]
    pub local_change: Option<CurrencyFloat>,
    #[serde(serialize_with = "serialize_money")]
    pub manager_profit: Option<CurrencyFloat>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CalculationError {
    DivisionByZero {
        dividend: CurrencyFloat,
    },
    /// `product` is the 1-based position of the offending price
    InvalidPrice {
        product: usize,
    },
    MissingField {
        field: &'static str,
    },
    NonPositiveExchangeRate {
        rate: CurrencyFloat,
    },
    OriginalTotalExceedsAmountDue {
        original: CurrencyFloat,
        amount_due: CurrencyFloat,
        difference: CurrencyFloat,
    },
    MissingTenderedAmount,
    /// A figure overflowed to an infinity while being calculated
    AmountOutOfRange {
        figure: &'static str,
    },
    InsufficientPayment {
        tendered: CurrencyFloat,
        required: CurrencyFloat,
        shortfall: CurrencyFloat,
    },
}

impl Display for CalculationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculationError::DivisionByZero { dividend } => {
                write!(f, "cannot divide {:.2} by zero", dividend)
            }
            CalculationError::InvalidPrice { product } => {
                write!(f, "please enter the price of product {}", product)
            }
            CalculationError::MissingField { field } => {
                write!(f, "please fill in all required fields ({})", field)
            }
            CalculationError::NonPositiveExchangeRate { .. } => {
                write!(f, "the exchange rate must be greater than 0")
            }
            CalculationError::OriginalTotalExceedsAmountDue {
                original,
                amount_due,
                difference,
            } => write!(
                f,
                "the original total ({:.2}) cannot exceed the amount due ({:.2}); difference: {:.2}",
                original, amount_due, difference
            ),
            CalculationError::MissingTenderedAmount => {
                write!(f, "please enter the amount tendered in foreign currency")
            }
            CalculationError::AmountOutOfRange { figure } => {
                write!(f, "the {} is too large to calculate", figure)
            }
            CalculationError::InsufficientPayment {
                tendered,
                required,
                shortfall,
            } => write!(
                f,
                "the amount tendered ({:.2}) cannot be less than the amount due ({:.2}); missing: {:.2}",
                tendered, required, shortfall
            ),
        }
    }
}

impl Error for CalculationError {}
