//! Terminal configuration.
//!
//! Seed data for the in-memory adapters: which card sits in the reader,
//! which cards and accounts the bank knows, and how much cash the
//! cassette starts with.  Loaded from JSON by the operator console;
//! [`TerminalConfig::default`] is the reference fixture.

use core::fmt;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::fsm::context::{AccountId, CardId, IdError};

/// A card registered with the bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRecord {
    pub card_id: String,
    pub pin: String,
}

/// An account and its opening balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    pub account_id: String,
    pub balance: i64,
}

/// Core terminal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Label used in log output
    pub terminal_id: String,
    /// Cash loaded in the cassette at start-up
    pub cash_on_hand: i64,
    /// Card the simulated reader yields
    pub inserted_card: String,
    pub cards: Vec<CardRecord>,
    pub accounts: Vec<AccountRecord>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            terminal_id: "ATM-0001".into(),
            cash_on_hand: 200,
            inserted_card: "CARD-1234".into(),
            cards: vec![CardRecord {
                card_id: "CARD-1234".into(),
                pin: "4321".into(),
            }],
            accounts: vec![AccountRecord {
                account_id: "ACC-111".into(),
                balance: 100,
            }],
        }
    }
}

impl TerminalConfig {
    /// Parse and validate a JSON document.  Missing fields take their
    /// default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Range- and uniqueness-check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cash_on_hand < 0 {
            return Err(ConfigError::ValidationFailed("cash_on_hand must be >= 0"));
        }
        self.inserted_card_id()?;

        let mut seen = HashSet::new();
        for card in &self.cards {
            let id = CardId::new(&card.card_id).map_err(ConfigError::id("cards.card_id"))?;
            if card.pin.is_empty() || !card.pin.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ConfigError::ValidationFailed("cards.pin must be non-empty digits"));
            }
            if !seen.insert(id) {
                return Err(ConfigError::ValidationFailed("duplicate card_id"));
            }
        }

        let mut seen = HashSet::new();
        for account in &self.accounts {
            let id = AccountId::new(&account.account_id)
                .map_err(ConfigError::id("accounts.account_id"))?;
            if account.balance < 0 {
                return Err(ConfigError::ValidationFailed("accounts.balance must be >= 0"));
            }
            if !seen.insert(id) {
                return Err(ConfigError::ValidationFailed("duplicate account_id"));
            }
        }
        Ok(())
    }

    /// The configured reader card as a typed id.
    pub fn inserted_card_id(&self) -> Result<CardId, ConfigError> {
        CardId::new(&self.inserted_card).map_err(ConfigError::id("inserted_card"))
    }
}

// ───────────────────────────────────────────────────────────────
// Errors
// ───────────────────────────────────────────────────────────────

/// Errors from loading or validating a [`TerminalConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid JSON for this schema.
    Parse(String),
    /// A field failed range or uniqueness validation.
    ValidationFailed(&'static str),
    /// An identifier field was empty or too long.
    InvalidId { field: &'static str, error: IdError },
}

impl ConfigError {
    /// Tag an [`IdError`] with the config field it came from.
    pub(crate) fn id(field: &'static str) -> impl Fn(IdError) -> Self {
        move |error| Self::InvalidId { field, error }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "parse error: {}", msg),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::InvalidId { field, error } => write!(f, "{}: {}", field, error),
        }
    }
}

impl std::error::Error for ConfigError {}
