//! Outbound session events.
//!
//! The [`AtmController`](super::service::AtmController) emits these through
//! the [`EventSink`](super::ports::EventSink) port after each successful
//! operation.  PINs never appear in an event.

use crate::fsm::SessionState;
use crate::fsm::context::{AccountId, CardId};

/// Structured events emitted by the session controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The session moved between states.
    StateChanged { from: SessionState, to: SessionState },

    /// A card was read from the slot.
    CardInserted(CardId),

    /// A PIN check completed.
    PinChecked { card: CardId, accepted: bool },

    /// The customer picked an account.
    AccountSelected(AccountId),

    /// A balance inquiry was answered.
    BalanceReported { account: AccountId, balance: i64 },

    /// Funds were credited.
    Deposited { account: AccountId, amount: i64 },

    /// Funds were debited and cash released.
    Withdrawn { account: AccountId, amount: i64 },

    /// The card was ejected and the session cleared.
    CardEjected,
}

/// A point-in-time view of the session, for display or audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    pub state: SessionState,
    pub card: Option<CardId>,
    pub account: Option<AccountId>,
}
