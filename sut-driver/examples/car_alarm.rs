//! Example: car alarm system under test.
//!
//! The test environment talks to the car alarm over the standard input and
//! output; logs are written to the standard error:
//!
//! ```text
//! $ RUST_LOG=sut_driver=debug cargo run --example car_alarm -- --simulate
//! close
//! lock
//! Delay: 25
//! armedOn
//! Delayed: 20
//! ```
//!
//! Time is simulated by default.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use sut_driver::driver::DriverInit;
use sut_driver::logging;
use sut_driver::models::CarAlarm;

#[derive(Debug, Parser)]
#[command(name = "car_alarm")]
#[command(about = "Car alarm system driven by a conformance test environment")]
struct Args {
    /// Duration of a model time unit in milliseconds (real time only)
    #[arg(long, value_name = "MS", default_value_t = 100.0)]
    time_unit: f64,

    /// Simulate time with `Delay: <N>` directives
    #[arg(long, conflicts_with = "real_time")]
    simulate: bool,

    /// Test against wall-clock time
    #[arg(long)]
    real_time: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let simulate = args.simulate || !args.real_time;

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
    let mut alarm = CarAlarm::new(&driver);

    match driver.run(&mut alarm) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(location = ?alarm.location(), "{}", e);
            ExitCode::FAILURE
        }
    }
}
