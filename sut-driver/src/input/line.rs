use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

use crate::error::ExecutionError;

/// Prefix shared by all delay directives, well-formed or not.
const DELAY_PREFIX: &str = "Delay:";

fn delay_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();

    PATTERN.get_or_init(|| Regex::new(r"^Delay: (\d+)$").expect("invalid delay pattern"))
}

/// A line of text exchanged with the test environment.
///
/// A line is either an event symbol of the system under test (`open`,
/// `coin`...) or, when time is simulated, a delay directive of the form
/// `Delay: <milliseconds>`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Line(String);

impl Line {
    /// Creates a line from its text, without the line terminator.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the text of the line.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the line into its text.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Checks whether the line is meant as a delay directive.
    ///
    /// Any line starting with `Delay:` qualifies, even if it is malformed:
    /// malformed directives are reported by [`Line::delay()`] rather than
    /// being mistaken for event symbols.
    pub fn is_delay_directive(&self) -> bool {
        self.0.starts_with(DELAY_PREFIX)
    }

    /// Parses the delay requested by a `Delay: <milliseconds>` directive.
    ///
    /// An error is returned if the line does not match the directive pattern
    /// exactly or if the delay overflows.
    pub fn delay(&self) -> Result<Duration, ExecutionError> {
        delay_pattern()
            .captures(&self.0)
            .and_then(|captures| captures[1].parse::<u64>().ok())
            .map(Duration::from_millis)
            .ok_or_else(|| ExecutionError::MalformedDelay(self.clone()))
    }
}

impl Deref for Line {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Line {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Line {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl PartialEq<str> for Line {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Line {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Line").field(&self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_directive_parsing() {
        assert_eq!(
            Line::new("Delay: 42").delay().unwrap(),
            Duration::from_millis(42)
        );
        assert_eq!(Line::new("Delay: 0").delay().unwrap(), Duration::ZERO);
    }

    #[test]
    fn malformed_delay_directives() {
        for text in [
            "Delay: ",
            "Delay: -3",
            "Delay: 1.5",
            "Delay:7",
            "Delay: 7 ",
            "Delay: 99999999999999999999999",
        ] {
            let line = Line::new(text);
            assert!(line.is_delay_directive(), "`{}` should be a directive", text);
            assert!(
                matches!(line.delay(), Err(ExecutionError::MalformedDelay(l)) if l == line),
                "`{}` should be rejected",
                text
            );
        }
    }

    #[test]
    fn event_symbols_are_not_directives() {
        for text in ["open", "coin", "Delayed: 3", " Delay: 3", "delay: 3"] {
            assert!(!Line::new(text).is_delay_directive());
        }
    }

    #[test]
    fn compare_with_str() {
        let line = Line::from("lock");
        assert_eq!(line, "lock");
        assert!(line != "unlock");
        assert_eq!(line.len(), 4);
        assert_eq!(line.to_string(), "lock");
    }
}
