//! Fish retailer driven with simulated and real time.

use std::time::Duration;

use sut_driver::driver::DriverInit;
use sut_driver::error::ExecutionError;
use sut_driver::input::InputBuffer;
use sut_driver::models::fish_retailer::{FishRetailer, Location};
use sut_driver::output::LineBuffer;
use sut_driver::time::{ManualClock, MonotonicTime, TimeSource};

use crate::test_env::scripted_driver;

#[test]
fn simulated_purchases() {
    let (mut driver, log) = scripted_driver([
        vec!["coin", "Delay: 5"],
        vec!["Delay: 10"],
        // Granted coin, but the tuna is not ready yet.
        vec!["coin", "Delay: 1"],
        vec!["Delay: 5"],
    ]);
    let mut retailer = FishRetailer::new(&driver);

    driver.run(&mut retailer).unwrap();

    assert_eq!(
        log.drain(),
        vec![
            "tuna",
            "garnish",
            "Delayed: 2",
            "Delayed: 10",
            "Delayed: 1",
            "tuna",
            "garnish",
            "Delayed: 1"
        ]
    );
    assert_eq!(retailer.location(), Location::Waiting);
}

#[test]
fn real_time_purchase() {
    let input = InputBuffer::new();
    let output = LineBuffer::new();
    let wall_clock = ManualClock::new(MonotonicTime::EPOCH);
    let mut driver = DriverInit::new()
        .time_unit(200.0)
        .input_buffer(input.clone())
        .output(output.clone())
        .time_source(wall_clock.clone())
        .init()
        .unwrap();
    let mut retailer = FishRetailer::new(&driver);

    input.push("coin");
    driver.start().unwrap();
    assert_eq!(driver.run_step(&mut retailer).unwrap(), 1);

    // Up to one time unit, polled every 50 ms.
    for _ in 0..4 {
        driver.on_step_done().unwrap();
        assert_eq!(driver.run_step(&mut retailer).unwrap(), 0);
    }
    assert!(output.is_empty());

    driver.on_step_done().unwrap();
    assert_eq!(driver.run_step(&mut retailer).unwrap(), 2);
    assert_eq!(output.drain(), vec!["tuna", "garnish"]);
    assert_eq!(
        wall_clock.now(),
        MonotonicTime::EPOCH + Duration::from_millis(250)
    );
}

#[test]
fn real_time_run_ends_on_protocol_violation() {
    let input = InputBuffer::new();
    let mut driver = DriverInit::new()
        .time_unit(200.0)
        .input_buffer(input.clone())
        .output(LineBuffer::new())
        .time_source(ManualClock::new(MonotonicTime::EPOCH))
        .init()
        .unwrap();
    let mut retailer = FishRetailer::new(&driver);

    input.push("coin");
    input.push("coin");

    assert!(matches!(
        driver.run(&mut retailer),
        Err(ExecutionError::UnexpectedInput { ref location, .. }) if location == "CoinGranted"
    ));
}
