//! Unified error type for the session controller.
//!
//! Every operation on [`AtmController`](crate::app::service::AtmController)
//! returns this type.  Precondition violations get their own variant;
//! collaborator failures are wrapped unchanged so the caller can still
//! tell a bank fault from a dispenser fault.

use core::fmt;

use crate::app::ports::{BankError, DispenserError, ReaderError};

// ---------------------------------------------------------------------------
// Session error
// ---------------------------------------------------------------------------

/// Why a session operation was refused or failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// PIN entry attempted with no card read.
    NoCardInserted,
    /// Account selection attempted before a valid PIN.
    NotAuthenticated,
    /// Balance, deposit or withdrawal attempted before account selection.
    NoAccountSelected,
    /// Deposit or withdrawal amount was zero or negative.
    InvalidAmount(i64),
    /// Withdrawal exceeds the ledger balance.
    InsufficientFunds { requested: i64, available: i64 },
    /// Withdrawal exceeds the cash held by the terminal.
    InsufficientCash { requested: i64 },
    /// The bank gateway reported a failure.
    Bank(BankError),
    /// The cash dispenser reported a failure.
    Dispenser(DispenserError),
    /// The card reader reported a failure.
    Reader(ReaderError),
}

impl SessionError {
    /// `true` for errors raised by the session rules themselves rather
    /// than by a collaborator.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, Self::Bank(_) | Self::Dispenser(_) | Self::Reader(_))
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCardInserted => write!(f, "no card inserted"),
            Self::NotAuthenticated => write!(f, "not authenticated"),
            Self::NoAccountSelected => write!(f, "no account selected"),
            Self::InvalidAmount(amount) => write!(f, "invalid amount: {amount}"),
            Self::InsufficientFunds {
                requested,
                available,
            } => write!(
                f,
                "insufficient funds: requested {requested}, available {available}"
            ),
            Self::InsufficientCash { requested } => {
                write!(f, "terminal has insufficient cash for {requested}")
            }
            Self::Bank(e) => write!(f, "bank: {e}"),
            Self::Dispenser(e) => write!(f, "dispenser: {e}"),
            Self::Reader(e) => write!(f, "card reader: {e}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<BankError> for SessionError {
    fn from(e: BankError) -> Self {
        Self::Bank(e)
    }
}

impl From<DispenserError> for SessionError {
    fn from(e: DispenserError) -> Self {
        Self::Dispenser(e)
    }
}

impl From<ReaderError> for SessionError {
    fn from(e: ReaderError) -> Self {
        Self::Reader(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Controller-wide `Result` alias.
pub type Result<T> = core::result::Result<T, SessionError>;
