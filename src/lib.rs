pub mod arithmetic;
mod conversions;
pub mod currency;
pub mod handlers;
pub mod output;
pub mod rand;
pub mod settings;
pub mod test_utils;
pub mod types;
mod validate;

use csv::StringRecord;
use rayon::prelude::*;
use std::error::Error;
use std::io;
use std::sync::mpsc::{sync_channel, SyncSender};
use std::thread;

pub use conversions::{format_prices, parse_amount, parse_prices};
use types::{RequestId, RequestRecord, ResultRecord};

/// A raw CSV row tagged with its position in the input
type NumberedRecord = (RequestId, Result<StringRecord, String>);

/// Read CSV string records from a stream and send them
/// across a channel to be deserialized elsewhere.
fn read_string_records_inner<R: io::Read + Send>(
    input: R,
    headers_snd: SyncSender<StringRecord>,
    records_snd: SyncSender<Vec<NumberedRecord>>,
    batch_size: usize,
) -> Result<(), Box<dyn Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?;
    headers_snd.send(headers.clone())?;

    let first_request: RequestId = 1;
    let mut records_iter = reader
        .records()
        .zip(first_request..)
        .map(|(record, request_id)| (request_id, record.map_err(|err| err.to_string())));

    loop {
        let batch: Vec<_> = (&mut records_iter).take(batch_size).collect();
        if !batch.is_empty() {
            records_snd.send(batch)?;
        } else {
            break;
        }
    }

    Ok(())
}

/// Thin error-handling wrapper around `read_string_records_inner`
fn read_string_records<R: io::Read + Send>(
    input: R,
    headers_snd: SyncSender<StringRecord>,
    records_snd: SyncSender<Vec<NumberedRecord>>,
    batch_size: usize,
) {
    if let Err(err) = read_string_records_inner(input, headers_snd, records_snd, batch_size) {
        log::error!("Error while reading: {}", err);
    }
}

/// Deserialize and calculate a single CSV string record.
fn calculate_record(
    (request_id, record): NumberedRecord,
    headers: &StringRecord,
) -> ResultRecord {
    let parsed = record.and_then(|record| {
        record
            .deserialize::<RequestRecord>(Some(headers))
            .map_err(|err| err.to_string())
    });

    match parsed {
        Ok(request) => {
            let outcome = handlers::handle_record(request);
            if let Err(err) = &outcome {
                log::debug!("Request {} rejected: {}", request_id, err);
            }
            ResultRecord::new(request_id, &outcome)
        }
        Err(err) => {
            log::error!("Error while deserializing request {}: {}", request_id, err);
            ResultRecord::error(request_id, err)
        }
    }
}

/// Set the number of workers in rayon's global
/// thread pool to dedicate to calculating requests.
pub fn configure_workers(num_workers: Option<usize>) {
    // Default to half of the available logical cores
    let num_threads = num_workers.unwrap_or_else(|| (num_cpus::get() / 2).max(1));

    let config_result = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global();

    if let Err(err) = config_result {
        log::error!("Error configuring rayon thread pool: {}", err);
    }
}

/// Read CSV requests from an input stream and write one result row per request.
/// Each request is an independent calculation, so batches are calculated in parallel;
/// rows are written in input order.
pub fn process_requests<R: io::Read + Send + 'static, W: io::Write>(
    input_stream: R,
    output_stream: &mut W,
    batch_size: usize,
) {
    // Maximum number of batches to keep in the channel at once.
    // Once this limit is reached, IO will pause until one is processed.
    let max_batches = 1;

    let (records_snd, records_rcv) = sync_channel::<Vec<NumberedRecord>>(max_batches);
    let (headers_snd, headers_rcv) = sync_channel::<StringRecord>(1);

    let batch_size = batch_size.max(1);
    let reader_handle = thread::spawn(move || {
        read_string_records(input_stream, headers_snd, records_snd, batch_size)
    });

    // Batches arrive in input order, so writing each one as soon as
    // it is calculated keeps the output ordered without buffering it all
    let mut writer = csv::Writer::from_writer(output_stream);
    let mut num_calculated = 0;
    if let Ok(headers) = headers_rcv.recv() {
        for batch in records_rcv {
            let result_batch: Vec<_> = batch
                .into_par_iter()
                .map(|record| calculate_record(record, &headers))
                .collect();
            num_calculated += result_batch.len();
            output::write_results(&result_batch, &mut writer);
        }
    } else {
        log::error!("Failed to get CSV headers from reader thread");
    }

    log::info!("Calculated {} requests", num_calculated);

    // Should already have finished, but wait just in case
    if let Err(err) = reader_handle.join() {
        log::error!("Failed to join reader thread: {:?}", err);
    }
}
