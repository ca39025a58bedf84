use std::io;

use pos_change_calculator::process_requests;
use pos_change_calculator::test_utils::{request, run_test_scenario};
use pos_change_calculator::types::{
    CalculationError, CalculationResult, RequestRecord, ResultRecord, ResultStatus,
};

#[test]
fn foreign_payment_change() {
    let requests = vec![request("120", "1000", Some("10"), "1000")];

    let expected = vec![Ok(CalculationResult {
        original_total: 1000.0,
        foreign_total: Some(8.33),
        foreign_change: Some(1.67),
        local_change: Some(200.4),
        manager_profit: 0.0,
    })];

    run_test_scenario(requests, expected);
}

#[test]
fn local_payment_profit() {
    let requests = vec![
        request("120", "1000", None, "600;300"),
        request("120", " 500.004 ", None, "100.10;200.20;150.30"),
    ];

    let expected = vec![
        Ok(CalculationResult {
            original_total: 900.0,
            foreign_total: None,
            foreign_change: None,
            local_change: None,
            manager_profit: 100.0,
        }),
        Ok(CalculationResult {
            original_total: 450.6,
            foreign_total: None,
            foreign_change: None,
            local_change: None,
            manager_profit: 49.4,
        }),
    ];

    run_test_scenario(requests, expected);
}

#[test]
fn original_total_exceeds_amount_due() {
    let requests = vec![request("120", "400", None, "100.00;250.50;49.99")];

    let expected = vec![Err(CalculationError::OriginalTotalExceedsAmountDue {
        original: 400.49,
        amount_due: 400.0,
        difference: 0.49,
    })];

    run_test_scenario(requests, expected);
}

#[test]
fn validation_errors_in_form_order() {
    let requests = vec![
        // Prices are checked before the other fields
        request("", "", None, "1;oops;3"),
        request("", "100", None, "1"),
        request("-1", "100", Some("5"), "1"),
        request("120", "1000", Some(""), "1"),
        request("120", "1000", Some("8.32"), "1"),
    ];

    let expected = vec![
        Err(CalculationError::InvalidPrice { product: 2 }),
        Err(CalculationError::MissingField {
            field: "exchange rate",
        }),
        Err(CalculationError::NonPositiveExchangeRate { rate: -1.0 }),
        Err(CalculationError::MissingTenderedAmount),
        Err(CalculationError::InsufficientPayment {
            tendered: 8.32,
            required: 8.33,
            shortfall: 0.01,
        }),
    ];

    run_test_scenario(requests, expected);
}

#[test]
fn malformed_rows_are_reported() {
    let input = "\
exchange_rate,total_amount,payment_currency,tendered,prices
120,1000,bitcoin,10,900
120,1000,local,,900
120,1000
";

    let mut output_buf = io::Cursor::new(Vec::new());
    process_requests(io::Cursor::new(input.to_string()), &mut output_buf, 1);

    output_buf.set_position(0);
    let results: Vec<ResultRecord> = csv::Reader::from_reader(output_buf)
        .into_deserialize()
        .collect::<Result<_, _>>()
        .unwrap();

    let statuses: Vec<_> = results.iter().map(|r| (r.request, r.status)).collect();
    assert_eq!(
        statuses,
        vec![
            (1, ResultStatus::Error),
            (2, ResultStatus::Ok),
            (3, ResultStatus::Error)
        ]
    );
    assert_eq!(results[1].manager_profit, Some(100.0));
    assert!(results[0].error.is_some());
    assert!(results[2].error.is_some());
}

/// Output sink that remembers how much had been written at every flush
#[derive(Default)]
struct FlushLog {
    buf: Vec<u8>,
    flushed_lengths: Vec<usize>,
}

impl io::Write for FlushLog {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() && self.flushed_lengths.last() != Some(&self.buf.len()) {
            self.flushed_lengths.push(self.buf.len());
        }
        Ok(())
    }
}

#[test]
fn results_are_written_batch_by_batch() {
    let input = "\
exchange_rate,total_amount,payment_currency,tendered,prices
120,1000,local,,900
120,1000,foreign,10,900
120,400,local,,500
";

    let mut output = FlushLog::default();
    process_requests(io::Cursor::new(input.to_string()), &mut output, 1);

    // One flush per single-row batch, each adding to what was already written
    assert_eq!(output.flushed_lengths.len(), 3);
    assert_eq!(*output.flushed_lengths.last().unwrap(), output.buf.len());

    let text = String::from_utf8(output.buf).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "1,ok,900.00,,,,100.00,");
    assert_eq!(lines[2], "2,ok,900.00,8.33,1.67,200.40,100.00,");
    assert!(lines[3].starts_with("3,error,"));
}

#[test]
fn missing_optional_columns_mean_local_payment() {
    let input = "exchange_rate,total_amount,prices\n120,1000,900\n";

    let mut output_buf = io::Cursor::new(Vec::new());
    process_requests(io::Cursor::new(input.to_string()), &mut output_buf, 10);

    output_buf.set_position(0);
    let results: Vec<ResultRecord> = csv::Reader::from_reader(output_buf)
        .into_deserialize()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, ResultStatus::Ok);
    assert_eq!(results[0].foreign_total, None);
    assert_eq!(results[0].manager_profit, Some(100.0));
}

#[test]
fn default_record_is_rejected() {
    run_test_scenario(
        vec![RequestRecord::default()],
        vec![Err(CalculationError::MissingField {
            field: "exchange rate",
        })],
    );
}
