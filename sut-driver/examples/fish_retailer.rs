//! Example: fish retailer under test.
//!
//! The test environment talks to the retailer over the standard input and
//! output; logs are written to the standard error. Time is real by default,
//! with a time unit of 200 ms:
//!
//! ```text
//! $ cargo run --example fish_retailer
//! coin
//! tuna
//! garnish
//! ```
//!
//! With `--simulate`, every input sequence must be followed by a delay
//! directive:
//!
//! ```text
//! $ cargo run --example fish_retailer -- --simulate
//! coin
//! Delay: 5
//! tuna
//! garnish
//! Delayed: 2
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use sut_driver::driver::DriverInit;
use sut_driver::logging;
use sut_driver::models::FishRetailer;

#[derive(Debug, Parser)]
#[command(name = "fish_retailer")]
#[command(about = "Fish retailer driven by a conformance test environment")]
struct Args {
    /// Duration of a model time unit in milliseconds (real time only)
    #[arg(long, value_name = "MS", default_value_t = 200.0)]
    time_unit: f64,

    /// Simulate time with `Delay: <N>` directives
    #[arg(long)]
    simulate: bool,

    /// Test against wall-clock time
    #[arg(long, conflicts_with = "simulate")]
    real_time: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let simulate = args.simulate && !args.real_time;

    let init = DriverInit::new()
        .time_unit(args.time_unit)
        .simulate(simulate);
    let log_init = if simulate {
        logging::init_with_virtual_time(init.virtual_time_reader())
    } else {
        logging::init()
    };
    if let Err(e) = log_init {
        eprintln!("failed to initialize logging: {}", e);
    }

    let mut driver = match init.init() {
        Ok(driver) => driver,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut retailer = FishRetailer::new(&driver);

    match driver.run(&mut retailer) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(location = ?retailer.location(), "{}", e);
            ExitCode::FAILURE
        }
    }
}
