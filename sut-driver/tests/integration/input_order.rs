//! Input ordering across delay directives.

use proptest::prelude::*;

use sut_driver::driver::{Progress, Sut, TestDriver};
use sut_driver::error::ExecutionError;
use sut_driver::input::InputBuffer;

use crate::test_env::scripted_driver;

// Echoes every input as an output.
struct Echo;

impl Sut for Echo {
    fn update(&mut self, driver: &mut TestDriver) -> Result<Progress, ExecutionError> {
        if !driver.input_ready() {
            return Ok(Progress::Quiescent);
        }
        let input = driver.read()?;
        driver.write(&input)?;

        Ok(Progress::Transitioned)
    }
}

fn symbol_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("open".to_string()),
        Just("close".to_string()),
        Just("lock".to_string()),
        Just("unlock".to_string()),
        "[a-z]{1,8}",
    ]
}

// A chunk of symbols followed by its delay directive.
fn chunk_strategy() -> impl Strategy<Value = (Vec<String>, u64)> {
    (prop::collection::vec(symbol_strategy(), 0..5), 0u64..5)
}

proptest! {
    #[test]
    fn inputs_are_read_in_arrival_order(
        chunks in prop::collection::vec(chunk_strategy(), 1..6)
    ) {
        let symbols: Vec<String> = chunks
            .iter()
            .flat_map(|(symbols, _)| symbols.iter().cloned())
            .collect();
        let script = chunks.iter().map(|(symbols, delay)| {
            let mut chunk = symbols.clone();
            chunk.push(format!("Delay: {}", delay));
            chunk
        });
        let (mut driver, log) = scripted_driver(script);

        driver.run(&mut Echo).unwrap();

        let (delayed, echoed): (Vec<String>, Vec<String>) = log
            .drain()
            .into_iter()
            .partition(|line| line.starts_with("Delayed:"));
        prop_assert_eq!(echoed, symbols);
        prop_assert_eq!(delayed.len(), chunks.len());
    }

    #[test]
    fn directives_do_not_reorder_the_buffer(
        lines in prop::collection::vec(
            prop_oneof![
                symbol_strategy(),
                (0u64..100).prop_map(|delay| format!("Delay: {}", delay)),
            ],
            0..20
        )
    ) {
        let buffer = InputBuffer::new();
        for line in &lines {
            buffer.push(line.as_str());
        }

        let directives: Vec<String> = buffer
            .remove_matching(|line| line.is_delay_directive())
            .into_iter()
            .map(|line| line.into_string())
            .collect();
        let mut symbols = Vec::new();
        while buffer.input_ready() {
            symbols.push(buffer.read().unwrap().into_string());
        }

        let (expected_directives, expected_symbols): (Vec<String>, Vec<String>) = lines
            .into_iter()
            .partition(|line| line.starts_with("Delay:"));
        prop_assert_eq!(directives, expected_directives);
        prop_assert_eq!(symbols, expected_symbols);
    }
}
