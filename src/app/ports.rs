//! Port traits — the boundary between the session logic and the devices
//! and services it drives.
//!
//! ```text
//!   BankGateway ◀──┐
//!                  │
//!  CashDispenser ◀─┼── AtmController ──▶ EventSink
//!                  │
//!    CardReader ◀──┘
//! ```
//!
//! Adapters (in-memory mocks, a host bank link, a dispenser driver)
//! implement these traits.  The [`AtmController`](super::service::AtmController)
//! takes them as generic parameters, so the session logic never names a
//! concrete device.
//!
//! ## Contract notes
//!
//! - **BankGateway** is the only source of balance truth.  It is assumed
//!   to give linearizable reads and writes per account; the controller
//!   does no cross-session locking of its own.
//! - **BankGateway::debit** does not enforce a lower bound.  Overdraft
//!   checks are the caller's job.
//! - **CardReader::eject_card** cannot fail.  A jammed slot is a hardware
//!   alarm, not a session error.

use core::fmt;

use crate::fsm::context::{AccountId, CardId, IdError};

// ───────────────────────────────────────────────────────────────
// Bank gateway (ledger + PIN authority)
// ───────────────────────────────────────────────────────────────

/// Ledger and authentication service, keyed by card and account id.
pub trait BankGateway {
    /// `Ok(true)` iff `pin` matches the card's registered PIN.  A mismatch
    /// has no side effects.
    fn validate_pin(&self, card: &CardId, pin: &str) -> Result<bool, BankError>;

    /// Current balance.  Fails with [`BankError::UnknownAccount`] for an
    /// account the bank does not hold.
    fn get_balance(&self, account: &AccountId) -> Result<i64, BankError>;

    /// Decrease the balance by `amount`.
    fn debit(&mut self, account: &AccountId, amount: i64) -> Result<(), BankError>;

    /// Increase the balance by `amount`.
    fn credit(&mut self, account: &AccountId, amount: i64) -> Result<(), BankError>;
}

// ───────────────────────────────────────────────────────────────
// Cash dispenser
// ───────────────────────────────────────────────────────────────

/// The cash cassette and its dispensing mechanism.
pub trait CashDispenser {
    /// `true` iff `amount` is no more than the current stock.
    fn has_cash(&self, amount: i64) -> bool;

    /// Release `amount` and decrement stock.  Fails if `amount` exceeds
    /// stock.
    fn dispense_cash(&mut self, amount: i64) -> Result<(), DispenserError>;
}

// ───────────────────────────────────────────────────────────────
// Card reader
// ───────────────────────────────────────────────────────────────

/// The card slot.
pub trait CardReader {
    /// Identifier of the card currently in the slot.
    fn read_card(&mut self) -> Result<CardId, ReaderError>;

    /// Push the card back out.  Harmless when the slot is empty.
    fn eject_card(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / audit trail)
// ───────────────────────────────────────────────────────────────

/// The controller emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &super::events::AppEvent) {}
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`BankGateway`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    /// The bank holds no such account.
    UnknownAccount(AccountId),
    /// The resulting balance would not fit the ledger's integer range.
    BalanceOverflow,
    /// The host link is down or timed out.
    Unavailable,
}

/// Errors from [`CashDispenser`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispenserError {
    /// Asked for more than the cassette holds.
    InsufficientStock { requested: i64, available: i64 },
    /// The mechanism failed mid-dispense.
    Jammed,
}

/// Errors from [`CardReader`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderError {
    /// The slot is empty.
    NoCard,
    /// The card could not be read.
    Unreadable,
    /// The card yielded a malformed identifier.
    InvalidCardId(IdError),
}

impl fmt::Display for BankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAccount(id) => write!(f, "unknown account {}", id),
            Self::BalanceOverflow => write!(f, "balance overflow"),
            Self::Unavailable => write!(f, "host unavailable"),
        }
    }
}

impl fmt::Display for DispenserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientStock {
                requested,
                available,
            } => write!(f, "requested {} but only {} in stock", requested, available),
            Self::Jammed => write!(f, "mechanism jammed"),
        }
    }
}

impl fmt::Display for ReaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCard => write!(f, "no card in slot"),
            Self::Unreadable => write!(f, "card unreadable"),
            Self::InvalidCardId(e) => write!(f, "invalid card id: {}", e),
        }
    }
}

impl From<IdError> for ReaderError {
    fn from(e: IdError) -> Self {
        Self::InvalidCardId(e)
    }
}
