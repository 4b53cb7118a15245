//! Fuzz target: arbitrary operation sequences
//!
//! Each input byte selects one controller operation against the
//! in-memory adapters and verifies after every step:
//! - No panics
//! - Session invariants hold
//! - Balance plus cash released equals opening balance plus deposits
//!
//! cargo fuzz run fuzz_session_ops

#![no_main]

use atm_terminal::AtmController;
use atm_terminal::adapters::bank::InMemoryBank;
use atm_terminal::adapters::card_reader::FixedCardReader;
use atm_terminal::adapters::dispenser::InMemoryDispenser;
use atm_terminal::fsm::context::{AccountId, CardId};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let card = CardId::new("CARD-1234").unwrap();
    let account = AccountId::new("ACC-111").unwrap();
    let mut atm = AtmController::new(
        InMemoryBank::new()
            .with_card(card.clone(), "4321")
            .with_account(account.clone(), 100),
        InMemoryDispenser::new(200),
        FixedCardReader::new(card),
    );

    let mut deposited = 0i64;
    for &byte in data {
        let amount = i64::from(byte >> 3) - 4;
        match byte & 0x07 {
            0 => {
                let _ = atm.insert_card();
            }
            1 => {
                let _ = atm.enter_pin(if byte & 0x80 == 0 { "4321" } else { "0000" });
            }
            2 => {
                let _ = atm.select_account(account.clone());
            }
            3 => {
                let _ = atm.get_balance();
            }
            4 => {
                if atm.deposit(amount).is_ok() {
                    deposited += amount;
                }
            }
            5 | 6 => {
                let _ = atm.withdraw(amount * 4);
            }
            _ => atm.eject_card(),
        }
        assert!(atm.session().invariants_hold());
    }

    let balance = atm.bank().balance_of(&account).unwrap();
    assert_eq!(balance + atm.dispenser().total_dispensed(), 100 + deposited);
});
