//! Car alarm driven with simulated time.

use sut_driver::error::ExecutionError;
use sut_driver::models::car_alarm::{CarAlarm, Location};

use crate::test_env::scripted_driver;

// Closed and locked car, then left alone for 25 time units.
const ARMING: [&str; 3] = ["close", "lock", "Delay: 25"];

#[test]
fn arms_after_close_and_lock() {
    let (mut driver, log) = scripted_driver([ARMING.to_vec()]);
    let mut alarm = CarAlarm::new(&driver);

    driver.run(&mut alarm).unwrap();

    assert_eq!(log.drain(), vec!["armedOn", "Delayed: 20"]);
    assert_eq!(alarm.location(), Location::L4);
}

#[test]
fn open_armed_car_triggers_alarm() {
    let (mut driver, log) = scripted_driver([ARMING.to_vec(), vec!["open", "Delay: 1"]]);
    let mut alarm = CarAlarm::new(&driver);

    driver.run(&mut alarm).unwrap();

    assert_eq!(
        log.drain(),
        vec![
            "armedOn",
            "Delayed: 20",
            "armedOff",
            "flashOn",
            "soundOn",
            "Delayed: 0"
        ]
    );
    assert_eq!(alarm.location(), Location::L9);
}

#[test]
fn unlock_disarms() {
    let (mut driver, log) = scripted_driver([ARMING.to_vec(), vec!["unlock", "Delay: 1"]]);
    let mut alarm = CarAlarm::new(&driver);

    driver.run(&mut alarm).unwrap();

    assert_eq!(
        log.drain(),
        vec!["armedOn", "Delayed: 20", "armedOff", "Delayed: 0"]
    );
    assert_eq!(alarm.location(), Location::L1);
}

#[test]
fn unlock_stops_alarm() {
    let (mut driver, log) = scripted_driver([
        ARMING.to_vec(),
        vec!["open", "Delay: 1"],
        vec!["Delay: 10"],
        vec!["unlock", "Delay: 1"],
    ]);
    let mut alarm = CarAlarm::new(&driver);

    driver.run(&mut alarm).unwrap();

    assert_eq!(
        log.drain()[6..],
        ["Delayed: 10", "soundOff", "flashOff", "Delayed: 0"]
    );
    assert_eq!(alarm.location(), Location::L0);
}

#[test]
fn alarm_cycle_and_rearming() {
    let (mut driver, log) = scripted_driver([
        ARMING.to_vec(),
        vec!["open", "Delay: 1"],
        // The sound stops after 30 time units.
        vec!["Delay: 100"],
        // The flash stops after 300 time units.
        vec!["Delay: 400"],
        vec!["close", "Delay: 1"],
        // Unattended re-armed alarm switches off after 400 time units.
        vec!["Delay: 500"],
    ]);
    let mut alarm = CarAlarm::new(&driver);

    driver.run(&mut alarm).unwrap();

    assert_eq!(
        log.drain()[6..],
        [
            "soundOff",
            "Delayed: 31",
            "soundOff",
            "flashOff",
            "Delayed: 270",
            "armedOn",
            "Delayed: 0",
            "armedOff",
            "Delayed: 401"
        ]
    );
    assert_eq!(alarm.location(), Location::L1);
}

#[test]
fn unexpected_input_is_fatal() {
    let (mut driver, log) = scripted_driver([ARMING.to_vec(), vec!["close", "Delay: 1"]]);
    let mut alarm = CarAlarm::new(&driver);

    let err = driver.run(&mut alarm).unwrap_err();

    assert!(matches!(
        err,
        ExecutionError::UnexpectedInput { ref location, ref input } if location == "L4" && input == "close"
    ));
    assert_eq!(log.drain(), vec!["armedOn", "Delayed: 20"]);
}

#[test]
fn extra_directives_are_not_read_as_inputs() {
    let (mut driver, log) = scripted_driver([vec!["close", "Delay: 2", "Delay: 3"]]);
    let mut alarm = CarAlarm::new(&driver);

    driver.run(&mut alarm).unwrap();

    assert_eq!(log.drain(), vec!["Delayed: 2"]);
    assert_eq!(alarm.location(), Location::L1);
}

#[test]
fn unexpected_input_after_alarm_is_fatal() {
    let (mut driver, log) = scripted_driver([
        ARMING.to_vec(),
        vec!["open", "Delay: 1"],
        vec!["Delay: 100"],
        vec!["Delay: 400"],
        // Only `close` and `unlock` are accepted once the alarm is over.
        vec!["open", "Delay: 1"],
    ]);
    let mut alarm = CarAlarm::new(&driver);

    let err = driver.run(&mut alarm).unwrap_err();

    assert!(matches!(
        err,
        ExecutionError::UnexpectedInput { ref location, ref input } if location == "L12" && input == "open"
    ));
    assert_eq!(alarm.location(), Location::L12);
    assert_eq!(log.drain().last().map(String::as_str), Some("Delayed: 270"));
}
