//! Reference systems under test.
//!
//! Both models are timed automata whose locations are dispatched with a
//! `match`. They can be run against a test environment with the `car_alarm`
//! and `fish_retailer` examples.
pub mod car_alarm;
pub mod fish_retailer;

pub use car_alarm::CarAlarm;
pub use fish_retailer::FishRetailer;
