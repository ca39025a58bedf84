use std::error::Error;
use std::fs;
use std::io;
use std::path;
use std::process::exit;

use structopt::StructOpt;

use pos_change_calculator::handlers::handle_calculation;
use pos_change_calculator::output::{format_result, CurrencyLabels};
use pos_change_calculator::settings::{toggle_theme, FileSettings, Theme};
use pos_change_calculator::types::{CalculationRequest, Payment};
use pos_change_calculator::{configure_workers, parse_amount, parse_prices, process_requests};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "pos-change-calculator",
    version = "0.1",
    author = "Oliver Evans <oliverevans96@gmail.com>",
    about = "Point-of-sale calculator for change due in a foreign currency and the manager's profit"
)]
enum CliOpts {
    /// Calculate a single sale
    Calculate {
        /// Local currency units per unit of foreign currency
        #[structopt(short, long)]
        rate: String,

        /// Total amount due, in local currency
        #[structopt(short, long)]
        total: String,

        /// Original product prices, separated by ';'
        #[structopt(short, long)]
        prices: String,

        /// Amount tendered in foreign currency.
        /// When omitted, the customer pays in local currency.
        #[structopt(long)]
        tendered: Option<String>,

        /// Local currency code used in the output
        #[structopt(long, default_value = "CUP")]
        local: String,

        /// Foreign currency code used in the output
        #[structopt(long, default_value = "USD")]
        foreign: String,
    },

    /// Calculate every sale in a CSV file, writing results to stdout
    Batch {
        /// Path to requests CSV file
        #[structopt(parse(from_os_str))]
        input_csv_path: path::PathBuf,

        /// Number of rows to read before handing them to the workers
        #[structopt(short, long, default_value = "1000")]
        batch_size: usize,

        /// Number of worker threads.
        /// Defaults to half of the logical cores
        #[structopt(short, long)]
        workers: Option<usize>,
    },

    /// Show or toggle the colour theme preference
    Theme {
        /// Switch between light and dark
        #[structopt(long)]
        toggle: bool,

        /// Path to the settings file
        #[structopt(long, parse(from_os_str), default_value = "settings.csv")]
        settings: path::PathBuf,

        /// Theme to use when none has been stored yet
        #[structopt(long)]
        dark: bool,
    },
}

fn calculate(
    request: CalculationRequest,
    labels: &CurrencyLabels,
) -> Result<(), Box<dyn Error>> {
    let result = handle_calculation(request)?;
    for line in format_result(&result, labels) {
        println!("{}", line);
    }
    Ok(())
}

fn show_theme(toggle: bool, settings_path: path::PathBuf, dark: bool) -> Result<(), Box<dyn Error>> {
    let mut settings = FileSettings::open(settings_path)?;
    let system_default = if dark { Theme::Dark } else { Theme::Light };

    let mut theme = Theme::load(&settings, system_default);
    if toggle {
        theme = toggle_theme(&mut settings, theme)?;
    }

    println!("{} ({})", theme, theme.icon());
    Ok(())
}

fn main() {
    // Allow log level to be set via env vars without recompiling
    env_logger::init();

    let outcome = match CliOpts::from_args() {
        CliOpts::Calculate {
            rate,
            total,
            prices,
            tendered,
            local,
            foreign,
        } => {
            let request = CalculationRequest {
                exchange_rate: parse_amount(&rate),
                total_amount: parse_amount(&total),
                payment: match tendered {
                    Some(tendered) => Payment::Foreign {
                        tendered: parse_amount(&tendered),
                    },
                    None => Payment::Local,
                },
                product_prices: parse_prices(&prices),
            };
            calculate(request, &CurrencyLabels { local, foreign })
        }
        CliOpts::Batch {
            input_csv_path,
            batch_size,
            workers,
        } => {
            configure_workers(workers);

            // Open file and process requests, writing to stdout
            match fs::File::open(&input_csv_path) {
                Ok(input_file) => {
                    process_requests(input_file, &mut io::stdout(), batch_size);
                    Ok(())
                }
                Err(err) => {
                    log::error!(
                        "Could not open input file '{}'",
                        input_csv_path.to_str().unwrap_or("<invalid path>")
                    );
                    Err(err.into())
                }
            }
        }
        CliOpts::Theme {
            toggle,
            settings,
            dark,
        } => show_theme(toggle, settings, dark),
    };

    if let Err(err) = outcome {
        eprintln!("{}", err);
        exit(1);
    }
}
