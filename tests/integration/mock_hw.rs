//! Mock collaborators for integration tests.
//!
//! Wraps the in-memory adapters so tests can record every call, inject
//! faults, and assert on the full history without real devices.

use std::cell::{Cell, RefCell};

use atm_terminal::AtmController;
use atm_terminal::adapters::bank::InMemoryBank;
use atm_terminal::adapters::card_reader::FixedCardReader;
use atm_terminal::adapters::dispenser::InMemoryDispenser;
use atm_terminal::app::events::AppEvent;
use atm_terminal::app::ports::{
    BankError, BankGateway, CardReader, CashDispenser, DispenserError, EventSink, ReaderError,
};
use atm_terminal::config::TerminalConfig;
use atm_terminal::fsm::context::{AccountId, CardId};

// ── Bank call record ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum BankCall {
    ValidatePin { card: String },
    GetBalance { account: String },
    Debit { account: String, amount: i64 },
    Credit { account: String, amount: i64 },
}

// ── MockBank ──────────────────────────────────────────────────

/// In-memory bank that logs calls and can be taken offline.
///
/// Fault flags are `Cell`s so a test can flip them through the
/// controller's shared accessors mid-session.
pub struct MockBank {
    pub inner: InMemoryBank,
    pub calls: RefCell<Vec<BankCall>>,
    pub offline: Cell<bool>,
}

#[allow(dead_code)]
impl MockBank {
    pub fn new(inner: InMemoryBank) -> Self {
        Self {
            inner,
            calls: RefCell::new(Vec::new()),
            offline: Cell::new(false),
        }
    }

    pub fn calls(&self) -> Vec<BankCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: BankCall) -> Result<(), BankError> {
        self.calls.borrow_mut().push(call);
        if self.offline.get() {
            Err(BankError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl BankGateway for MockBank {
    fn validate_pin(&self, card: &CardId, pin: &str) -> Result<bool, BankError> {
        self.record(BankCall::ValidatePin {
            card: card.to_string(),
        })?;
        self.inner.validate_pin(card, pin)
    }

    fn get_balance(&self, account: &AccountId) -> Result<i64, BankError> {
        self.record(BankCall::GetBalance {
            account: account.to_string(),
        })?;
        self.inner.get_balance(account)
    }

    fn debit(&mut self, account: &AccountId, amount: i64) -> Result<(), BankError> {
        self.record(BankCall::Debit {
            account: account.to_string(),
            amount,
        })?;
        self.inner.debit(account, amount)
    }

    fn credit(&mut self, account: &AccountId, amount: i64) -> Result<(), BankError> {
        self.record(BankCall::Credit {
            account: account.to_string(),
            amount,
        })?;
        self.inner.credit(account, amount)
    }
}

// ── MockDispenser ─────────────────────────────────────────────

/// Dispenser that reports stock honestly but can jam on dispense.
pub struct MockDispenser {
    pub inner: InMemoryDispenser,
    pub jam: Cell<bool>,
    pub dispense_calls: u32,
}

impl MockDispenser {
    pub fn new(stock: i64) -> Self {
        Self {
            inner: InMemoryDispenser::new(stock),
            jam: Cell::new(false),
            dispense_calls: 0,
        }
    }
}

impl CashDispenser for MockDispenser {
    fn has_cash(&self, amount: i64) -> bool {
        self.inner.has_cash(amount)
    }

    fn dispense_cash(&mut self, amount: i64) -> Result<(), DispenserError> {
        self.dispense_calls += 1;
        if self.jam.get() {
            return Err(DispenserError::Jammed);
        }
        self.inner.dispense_cash(amount)
    }
}

// ── MockReader ────────────────────────────────────────────────

/// Reader whose next read can be made to fail.
pub struct MockReader {
    pub inner: FixedCardReader,
    pub fail_with: Cell<Option<ReaderError>>,
}

impl MockReader {
    pub fn new(card: &str) -> Self {
        Self {
            inner: FixedCardReader::new(CardId::new(card).unwrap()),
            fail_with: Cell::new(None),
        }
    }
}

impl CardReader for MockReader {
    fn read_card(&mut self) -> Result<CardId, ReaderError> {
        match self.fail_with.get() {
            Some(e) => Err(e),
            None => self.inner.read_card(),
        }
    }

    fn eject_card(&mut self) {
        self.inner.eject_card();
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Fixtures ──────────────────────────────────────────────────

pub type MockAtm = AtmController<MockBank, MockDispenser, MockReader, RecordingSink>;

/// Controller over the reference fixture: CARD-1234 / PIN 4321,
/// ACC-111 holding 100, 200 in the cassette.
pub fn make_atm() -> MockAtm {
    let cfg = TerminalConfig::default();
    AtmController::with_sink(
        MockBank::new(InMemoryBank::from_config(&cfg).unwrap()),
        MockDispenser::new(cfg.cash_on_hand),
        MockReader::new(&cfg.inserted_card),
        RecordingSink::default(),
    )
}

pub fn acc(id: &str) -> AccountId {
    AccountId::new(id).unwrap()
}

/// Fixture advanced to `AccountSelected` on ACC-111.
pub fn ready_atm() -> MockAtm {
    let mut atm = make_atm();
    atm.insert_card().unwrap();
    assert!(atm.enter_pin("4321").unwrap());
    atm.select_account(acc("ACC-111")).unwrap();
    atm
}
