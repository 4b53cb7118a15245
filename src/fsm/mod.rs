//! Session state machine.
//!
//! ```text
//!            insert_card                enter_pin(ok)            select_account
//!  ┌──────┐ ───────────▶ ┌─────────────┐ ───────────▶ ┌───────────────┐ ───────────▶ ┌─────────────────┐
//!  │ Idle │              │ CardPresent │ ◀─────────── │ Authenticated │              │ AccountSelected │
//!  └──────┘              └─────────────┘ enter_pin(✗) └───────────────┘              └─────────────────┘
//!     ▲                                                                               balance/deposit/
//!     └──────────────────────────── eject_card (from any state) ─────────────────────  withdraw loop
//! ```
//!
//! The state is never stored on its own; it is derived from the
//! [`Session`](context::Session) fields so the two cannot drift apart.
//! Each operation has a minimum state, checked by [`SessionState::require`]
//! before the controller touches any collaborator.

pub mod context;

use log::info;

use crate::error::SessionError;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// The four session states, ordered by how far the card cycle has advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SessionState {
    Idle,
    CardPresent,
    Authenticated,
    AccountSelected,
}

impl SessionState {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::CardPresent => "CardPresent",
            Self::Authenticated => "Authenticated",
            Self::AccountSelected => "AccountSelected",
        }
    }

    /// Check that `op` is allowed in this state.
    ///
    /// The error names the first missing step: a balance request with no
    /// card is `NoAccountSelected`, not `NoCardInserted`.
    pub fn require(self, op: Operation) -> Result<(), SessionError> {
        let needed = op.min_state();
        if self >= needed {
            return Ok(());
        }
        // `needed` is never Idle here: every state satisfies Idle.
        Err(match needed {
            Self::Idle | Self::CardPresent => SessionError::NoCardInserted,
            Self::Authenticated => SessionError::NotAuthenticated,
            Self::AccountSelected => SessionError::NoAccountSelected,
        })
    }
}

impl core::fmt::Display for SessionState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Every operation the controller exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    InsertCard,
    EnterPin,
    SelectAccount,
    GetBalance,
    Deposit,
    Withdraw,
    EjectCard,
}

impl Operation {
    /// Lowest state in which the operation may run.
    pub const fn min_state(self) -> SessionState {
        match self {
            Self::InsertCard | Self::EjectCard => SessionState::Idle,
            Self::EnterPin => SessionState::CardPresent,
            Self::SelectAccount => SessionState::Authenticated,
            Self::GetBalance | Self::Deposit | Self::Withdraw => SessionState::AccountSelected,
        }
    }
}

/// Log a state change if there was one.  Returns `true` when `from != to`.
pub fn log_transition(from: SessionState, to: SessionState) -> bool {
    if from == to {
        return false;
    }
    info!("Session transition: {} -> {}", from, to);
    true
}
