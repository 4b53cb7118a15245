//! Fuzz target: operator command parser
//!
//! Feeds arbitrary UTF-8 lines to `SessionCommand::from_str` and checks:
//! - No panics on any input
//! - Accepted PINs are digits only
//! - Accepted account ids are non-empty and within `MAX_ID_LEN`
//!
//! cargo fuzz run fuzz_command_parser

#![no_main]

use atm_terminal::app::commands::SessionCommand;
use atm_terminal::fsm::context::MAX_ID_LEN;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = core::str::from_utf8(data) else {
        return;
    };
    match line.parse::<SessionCommand>() {
        Ok(SessionCommand::EnterPin(pin)) => {
            assert!(!pin.is_empty());
            assert!(pin.bytes().all(|b| b.is_ascii_digit()));
        }
        Ok(SessionCommand::SelectAccount(id)) => {
            assert!(!id.as_str().is_empty());
            assert!(id.as_str().len() <= MAX_ID_LEN);
        }
        _ => {}
    }
});
