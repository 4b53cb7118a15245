//! Session data owned by the controller.
//!
//! `Session` holds only identifiers: the card currently in the reader,
//! whether its PIN was accepted, and the account the customer picked.
//! Balances and cash stock are never cached here; every check goes back
//! to the collaborator that owns the value.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::SessionState;

/// Maximum length of a card or account identifier, in bytes.
pub const MAX_ID_LEN: usize = 32;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Reasons an identifier string is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdError {
    Empty,
    TooLong,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "identifier is empty"),
            Self::TooLong => write!(f, "identifier exceeds {MAX_ID_LEN} bytes"),
        }
    }
}

impl std::error::Error for IdError {}

fn bounded(raw: &str) -> Result<heapless::String<MAX_ID_LEN>, IdError> {
    if raw.is_empty() {
        return Err(IdError::Empty);
    }
    let mut s = heapless::String::new();
    s.push_str(raw).map_err(|()| IdError::TooLong)?;
    Ok(s)
}

macro_rules! bounded_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(heapless::String<MAX_ID_LEN>);

        impl $name {
            /// Build from a raw string, kept byte for byte.
            pub fn new(raw: &str) -> Result<Self, IdError> {
                bounded(raw).map(Self)
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(raw: String) -> Result<Self, Self::Error> {
                Self::new(&raw)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.as_str().to_owned()
            }
        }
    };
}

bounded_id! {
    /// Opaque identifier of a physical card, as read by the card reader.
    CardId
}

bounded_id! {
    /// Opaque identifier of a bank account, supplied by the customer.
    AccountId
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Mutable per-card-cycle state.
///
/// Invariants, upheld by every mutator:
/// - `authenticated` implies a card is present.
/// - a selected account implies `authenticated`.
#[derive(Debug, Clone, Default)]
pub struct Session {
    card: Option<CardId>,
    authenticated: bool,
    account: Option<AccountId>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state, derived from the fields.
    pub fn state(&self) -> SessionState {
        match (&self.card, self.authenticated, &self.account) {
            (None, _, _) => SessionState::Idle,
            (Some(_), false, _) => SessionState::CardPresent,
            (Some(_), true, None) => SessionState::Authenticated,
            (Some(_), true, Some(_)) => SessionState::AccountSelected,
        }
    }

    pub fn card(&self) -> Option<&CardId> {
        self.card.as_ref()
    }

    pub fn account(&self) -> Option<&AccountId> {
        self.account.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Start a new card cycle.  Any previous authentication and account
    /// selection is dropped, even if a card was already present.
    pub fn begin(&mut self, card: CardId) {
        self.card = Some(card);
        self.authenticated = false;
        self.account = None;
    }

    /// Record the outcome of a PIN check.  A rejected PIN also drops the
    /// selected account.
    pub fn set_authenticated(&mut self, ok: bool) {
        self.authenticated = ok && self.card.is_some();
        if !self.authenticated {
            self.account = None;
        }
    }

    /// Record the chosen account.  Ignored unless authenticated.
    pub fn select(&mut self, account: AccountId) {
        if self.authenticated {
            self.account = Some(account);
        }
    }

    /// Back to `Idle`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check the field invariants.
    pub fn invariants_hold(&self) -> bool {
        (!self.authenticated || self.card.is_some())
            && (self.account.is_none() || self.authenticated)
    }
}
