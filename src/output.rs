use std::io;

use crate::types::{CalculationError, CalculationResult, RequestId, ResultRecord, ResultStatus};

/// Currency codes used when rendering figures
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyLabels {
    pub local: String,
    pub foreign: String,
}

impl Default for CurrencyLabels {
    fn default() -> Self {
        Self {
            local: "CUP".to_string(),
            foreign: "USD".to_string(),
        }
    }
}

/// Render a result as the lines shown to the cashier.
/// The foreign-currency lines only appear when the customer paid in foreign currency.
pub fn format_result(result: &CalculationResult, labels: &CurrencyLabels) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(foreign_total) = result.foreign_total {
        lines.push(format!(
            "Customer payment in {}: ${:.2}",
            labels.foreign, foreign_total
        ));
    }
    if let (Some(local_change), Some(foreign_change)) = (result.local_change, result.foreign_change)
    {
        lines.push(format!(
            "Change: {:.2} {} (${:.2} {})",
            local_change, labels.local, foreign_change, labels.foreign
        ));
    }
    lines.push(format!(
        "Manager profit: {:.2} {}",
        result.manager_profit, labels.local
    ));

    lines
}

impl ResultRecord {
    pub fn new(request: RequestId, outcome: &Result<CalculationResult, CalculationError>) -> Self {
        match outcome {
            Ok(result) => ResultRecord {
                request,
                status: ResultStatus::Ok,
                original_total: Some(result.original_total),
                foreign_total: result.foreign_total,
                foreign_change: result.foreign_change,
                local_change: result.local_change,
                manager_profit: Some(result.manager_profit),
                error: None,
            },
            Err(err) => ResultRecord::error(request, err.to_string()),
        }
    }

    pub fn error(request: RequestId, message: String) -> Self {
        ResultRecord {
            request,
            status: ResultStatus::Error,
            original_total: None,
            foreign_total: None,
            foreign_change: None,
            local_change: None,
            manager_profit: None,
            error: Some(message),
        }
    }
}

/// Append result rows to a CSV writer, flushing so each batch
/// reaches the output stream before the next one is calculated.
pub fn write_results<W: io::Write>(records: &[ResultRecord], writer: &mut csv::Writer<W>) {
    for record in records {
        if let Err(err) = writer.serialize(record) {
            log::error!("error writing serialized result: {}", err);
        }
    }
    if let Err(err) = writer.flush() {
        log::error!("error flushing serialized results: {}", err);
    }
}
