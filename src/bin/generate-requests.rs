use std::io;
use std::process::exit;
use structopt::StructOpt;

use pos_change_calculator::rand::generate_random_valid_request_sequence;
use pos_change_calculator::types::CurrencyFloat;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "generate-requests",
    version = "0.1",
    author = "Oliver Evans <oliverevans96@gmail.com>",
    about = "Generate random valid sales for the point-of-sale change calculator."
)]
struct CliOpts {
    /// Number of requests to generate.
    /// Defaults to infinite (run until cancelled)
    #[structopt(short, long)]
    requests: Option<usize>,

    /// Maximum exchange rate.
    #[structopt(long, default_value = "500")]
    max_rate: CurrencyFloat,

    /// Maximum number of products per sale.
    #[structopt(short = "n", long, default_value = "10")]
    max_products: usize,

    /// Maximum price of a single product.
    #[structopt(short = "p", long, default_value = "1000")]
    max_price: CurrencyFloat,

    /// Maximum number of times to attempt to generate
    /// a new valid request before aborting
    #[structopt(short, long, default_value = "10000")]
    attempts: usize,
}

fn generate_requests(
    num_requests: Option<usize>,
    max_rate: CurrencyFloat,
    max_products: usize,
    max_price: CurrencyFloat,
    max_attempts: usize,
) {
    // Write to stdout
    let output = io::stdout();
    let mut writer = csv::Writer::from_writer(output);

    let seq = generate_random_valid_request_sequence(
        num_requests,
        max_rate,
        max_products,
        max_price,
        max_attempts,
    );
    let mut num_generated = 0;
    for request in seq {
        if let Err(err) = writer.serialize(request) {
            log::error!("Error writing generated request: {}", err);
        } else {
            num_generated += 1;
        }
    }
    if let Err(err) = writer.flush() {
        log::error!("Error flushing generated requests: {}", err);
    }

    if let Some(desired) = num_requests {
        if num_generated < desired {
            log::error!("Only generated {} / {} requests.", num_generated, desired);
            exit(1);
        }
    }
}

fn main() {
    // Allow log level to be set via env vars without recompiling
    env_logger::init();

    // Parse arguments
    let CliOpts {
        requests,
        max_rate,
        max_products,
        max_price,
        attempts,
    } = CliOpts::from_args();

    generate_requests(requests, max_rate, max_products, max_price, attempts);
}
