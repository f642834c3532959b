//! Fish retailer.
//!
//! ```text
//!              ┌───────────────┐
//!   coin ●────►│ Fish retailer ├────► tuna
//!              │               ├────► garnish
//!              └───────────────┘
//! ```
//!
//! A coin buys a tuna, handed out once more than one time unit has passed.
//! A free garnish follows if the tuna came within three time units of the
//! coin.

use tracing::trace;

use crate::driver::{Progress, Sut, TestDriver};
use crate::error::ExecutionError;
use crate::time::Clock;

const INPUT_COIN: &str = "coin";
const OUTPUT_TUNA: &str = "tuna";
const OUTPUT_GARNISH: &str = "garnish";

/// Location of the fish retailer automaton.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    /// Waiting for a coin.
    Waiting,
    /// A coin was inserted; the tuna is being prepared.
    CoinGranted,
}

/// A fish retailer under test.
#[derive(Debug)]
pub struct FishRetailer {
    location: Location,
    x: Clock,
    free: bool,
}

impl FishRetailer {
    /// Creates a fish retailer waiting for a coin, resetting its clock.
    pub fn new(driver: &TestDriver) -> Self {
        Self {
            location: Location::Waiting,
            x: driver.reset_time(),
            free: false,
        }
    }

    /// Returns the current location.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Checks whether a garnish is still owed for the last coin.
    pub fn is_garnish_owed(&self) -> bool {
        self.free
    }
}

impl Sut for FishRetailer {
    fn update(&mut self, driver: &mut TestDriver) -> Result<Progress, ExecutionError> {
        match self.location {
            Location::Waiting => {
                if driver.input_ready() {
                    let input = driver.read()?;
                    if input != INPUT_COIN {
                        return Err(ExecutionError::unexpected_input(self.location, input));
                    }
                    self.free = true;
                    self.x = driver.reset_time();
                    self.location = Location::CoinGranted;
                } else if self.free && driver.get_value(self.x) < 3.0 {
                    driver.write(OUTPUT_GARNISH)?;
                    self.free = false;
                } else {
                    return Ok(Progress::Quiescent);
                }
            }
            Location::CoinGranted => {
                // No input is accepted until the tuna is served.
                if driver.input_ready() {
                    let input = driver.read()?;
                    return Err(ExecutionError::unexpected_input(self.location, input));
                }
                if driver.get_value(self.x) > 1.0 {
                    driver.write(OUTPUT_TUNA)?;
                    self.location = Location::Waiting;
                } else {
                    return Ok(Progress::Quiescent);
                }
            }
        }
        trace!(location = ?self.location, free = self.free, "fish retailer transition");

        Ok(Progress::Transitioned)
    }
}
