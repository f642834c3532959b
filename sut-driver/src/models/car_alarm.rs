//! Car alarm system.
//!
//! ```text
//!                 ┌────────────┐
//!    close ●─────►│            ├─────► armedOn
//!     open ●─────►│            ├─────► armedOff
//!     lock ●─────►│ Car alarm  ├─────► flashOn / flashOff
//!   unlock ●─────►│            ├─────► soundOn / soundOff
//!                 └────────────┘
//! ```
//!
//! The alarm arms itself 20 time units after the car was closed and locked.
//! Opening an armed car triggers the sound for 30 time units and the flash
//! for 300 time units, unless the car is unlocked in the meantime.

use tracing::trace;

use crate::driver::{Progress, Sut, TestDriver};
use crate::error::ExecutionError;
use crate::input::Line;
use crate::time::Clock;

// Inputs.
const INPUT_CLOSE: &str = "close";
const INPUT_OPEN: &str = "open";
const INPUT_LOCK: &str = "lock";
const INPUT_UNLOCK: &str = "unlock";

// Outputs.
const OUTPUT_ARMED_OFF: &str = "armedOff";
const OUTPUT_ARMED_ON: &str = "armedOn";
const OUTPUT_FLASH_OFF: &str = "flashOff";
const OUTPUT_FLASH_ON: &str = "flashOn";
const OUTPUT_SOUND_OFF: &str = "soundOff";
const OUTPUT_SOUND_ON: &str = "soundOn";

// Clock bounds [time units].
const ARMING_DELAY: f64 = 20.0;
const SOUND_DURATION: f64 = 30.0;
const FLASH_DURATION: f64 = 300.0;
const REARMING_DELAY: f64 = 400.0;

/// Location of the car alarm automaton.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    /// Open and unlocked.
    L0,
    /// Closed and unlocked.
    L1,
    /// Open and locked.
    L2,
    /// Closed and locked, arming.
    L3,
    /// Armed.
    L4,
    /// Disarming after an unlock.
    L5,
    /// Alarm triggered.
    L6,
    /// Sounding and flashing.
    L9,
    /// Alarm stopped by an unlock.
    L10,
    /// Flashing.
    L11,
    /// Silent after an alarm.
    L12,
    /// Re-arming after an alarm.
    L13,
}

/// A car alarm system under test.
#[derive(Debug)]
pub struct CarAlarm {
    location: Location,
    x: Clock,
    alarm_locked: bool,
}

impl CarAlarm {
    /// Creates a car alarm in its initial location, resetting its clock.
    pub fn new(driver: &TestDriver) -> Self {
        Self {
            location: Location::L0,
            x: driver.reset_time(),
            alarm_locked: false,
        }
    }

    /// Returns the current location.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Takes at most one transition and returns the next location, or `None`
    /// if the alarm is quiescent.
    fn next_location(
        &mut self,
        driver: &mut TestDriver,
    ) -> Result<Option<Location>, ExecutionError> {
        use Location::*;

        let next = match self.location {
            L0 => match next_input(driver)? {
                None => return Ok(None),
                Some(input) if input == INPUT_CLOSE => L1,
                Some(input) if input == INPUT_LOCK => L2,
                Some(input) => return Err(self.unexpected(input)),
            },
            L1 => match next_input(driver)? {
                None => return Ok(None),
                Some(input) if input == INPUT_OPEN => L0,
                Some(input) if input == INPUT_LOCK => {
                    self.x = driver.reset_time();
                    L3
                }
                Some(input) => return Err(self.unexpected(input)),
            },
            L2 => match next_input(driver)? {
                None => return Ok(None),
                Some(input) if input == INPUT_UNLOCK => L0,
                Some(input) if input == INPUT_CLOSE => {
                    self.x = driver.reset_time();
                    L3
                }
                Some(input) => return Err(self.unexpected(input)),
            },
            L3 => {
                if driver.get_value(self.x) >= ARMING_DELAY {
                    driver.write(OUTPUT_ARMED_ON)?;
                    self.alarm_locked = false;
                    L4
                } else {
                    match next_input(driver)? {
                        None => return Ok(None),
                        Some(input) if input == INPUT_UNLOCK => L1,
                        Some(input) if input == INPUT_OPEN => L2,
                        Some(input) => return Err(self.unexpected(input)),
                    }
                }
            }
            L4 => match next_input(driver)? {
                None if self.alarm_locked && driver.get_value(self.x) > REARMING_DELAY => {
                    self.x = driver.reset_time();
                    driver.write(OUTPUT_ARMED_OFF)?;
                    L1
                }
                None => return Ok(None),
                Some(input) if input == INPUT_UNLOCK => {
                    self.x = driver.reset_time();
                    L5
                }
                Some(input) if input == INPUT_OPEN => {
                    self.x = driver.reset_time();
                    L6
                }
                Some(input) => return Err(self.unexpected(input)),
            },
            L5 => {
                driver.write(OUTPUT_ARMED_OFF)?;
                L1
            }
            L6 => {
                driver.write_all([OUTPUT_ARMED_OFF, OUTPUT_FLASH_ON, OUTPUT_SOUND_ON])?;
                L9
            }
            L9 => {
                if driver.get_value(self.x) > SOUND_DURATION {
                    driver.write(OUTPUT_SOUND_OFF)?;
                    L11
                } else {
                    match next_input(driver)? {
                        None => return Ok(None),
                        Some(input) if input == INPUT_UNLOCK => {
                            self.x = driver.reset_time();
                            L10
                        }
                        Some(input) => return Err(self.unexpected(input)),
                    }
                }
            }
            L10 => {
                driver.write_all([OUTPUT_SOUND_OFF, OUTPUT_FLASH_OFF])?;
                L0
            }
            L11 => {
                if driver.get_value(self.x) > FLASH_DURATION {
                    driver.write_all([OUTPUT_SOUND_OFF, OUTPUT_FLASH_OFF])?;
                    L12
                } else {
                    match next_input(driver)? {
                        None => return Ok(None),
                        Some(input) if input == INPUT_UNLOCK => {
                            self.x = driver.reset_time();
                            L10
                        }
                        Some(input) => return Err(self.unexpected(input)),
                    }
                }
            }
            L12 => match next_input(driver)? {
                None => return Ok(None),
                Some(input) if input == INPUT_CLOSE => {
                    self.x = driver.reset_time();
                    L13
                }
                Some(input) if input == INPUT_UNLOCK => L0,
                Some(input) => return Err(self.unexpected(input)),
            },
            L13 => {
                driver.write(OUTPUT_ARMED_ON)?;
                self.alarm_locked = true;
                L4
            }
        };

        Ok(Some(next))
    }

    fn unexpected(&self, input: Line) -> ExecutionError {
        ExecutionError::unexpected_input(self.location, input)
    }
}

impl Sut for CarAlarm {
    fn update(&mut self, driver: &mut TestDriver) -> Result<Progress, ExecutionError> {
        match self.next_location(driver)? {
            Some(next) => {
                trace!(from = ?self.location, to = ?next, "car alarm transition");
                self.location = next;

                Ok(Progress::Transitioned)
            }
            None => Ok(Progress::Quiescent),
        }
    }
}

/// Reads the next input, if any.
fn next_input(driver: &mut TestDriver) -> Result<Option<Line>, ExecutionError> {
    if driver.input_ready() {
        driver.read().map(Some)
    } else {
        Ok(None)
    }
}
