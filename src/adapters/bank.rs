//! In-memory bank adapter.
//!
//! Implements [`BankGateway`] over two maps: card → PIN and account →
//! balance.  Used by the operator console and the tests; a host-link
//! adapter would implement the same trait.

use std::collections::HashMap;

use log::info;

use crate::app::ports::{BankError, BankGateway};
use crate::config::{ConfigError, TerminalConfig};
use crate::fsm::context::{AccountId, CardId};

#[derive(Debug, Clone, Default)]
pub struct InMemoryBank {
    pins: HashMap<CardId, String>,
    balances: HashMap<AccountId, i64>,
}

impl InMemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from the card and account records in `cfg`.
    pub fn from_config(cfg: &TerminalConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let mut bank = Self::new();
        for card in &cfg.cards {
            let id = CardId::new(&card.card_id).map_err(ConfigError::id("cards.card_id"))?;
            bank.pins.insert(id, card.pin.clone());
        }
        for account in &cfg.accounts {
            let id = AccountId::new(&account.account_id)
                .map_err(ConfigError::id("accounts.account_id"))?;
            bank.balances.insert(id, account.balance);
        }
        info!(
            "InMemoryBank: {} cards, {} accounts",
            bank.pins.len(),
            bank.balances.len()
        );
        Ok(bank)
    }

    /// Register (or re-register) a card's PIN.
    pub fn with_card(mut self, card: CardId, pin: &str) -> Self {
        self.pins.insert(card, pin.to_owned());
        self
    }

    /// Open (or overwrite) an account.
    pub fn with_account(mut self, account: AccountId, balance: i64) -> Self {
        self.balances.insert(account, balance);
        self
    }

    pub fn balance_of(&self, account: &AccountId) -> Option<i64> {
        self.balances.get(account).copied()
    }

    /// Sum of every balance the bank holds, or `None` if it does not fit
    /// in an `i64`.
    pub fn total_deposits(&self) -> Option<i64> {
        self.balances
            .values()
            .try_fold(0i64, |total, &balance| total.checked_add(balance))
    }

    fn balance_mut(&mut self, account: &AccountId) -> Result<&mut i64, BankError> {
        self.balances
            .get_mut(account)
            .ok_or_else(|| BankError::UnknownAccount(account.clone()))
    }
}

impl BankGateway for InMemoryBank {
    fn validate_pin(&self, card: &CardId, pin: &str) -> Result<bool, BankError> {
        Ok(self.pins.get(card).is_some_and(|p| p == pin))
    }

    fn get_balance(&self, account: &AccountId) -> Result<i64, BankError> {
        self.balance_of(account)
            .ok_or_else(|| BankError::UnknownAccount(account.clone()))
    }

    fn debit(&mut self, account: &AccountId, amount: i64) -> Result<(), BankError> {
        let balance = self.balance_mut(account)?;
        *balance = balance
            .checked_sub(amount)
            .ok_or(BankError::BalanceOverflow)?;
        Ok(())
    }

    fn credit(&mut self, account: &AccountId, amount: i64) -> Result<(), BankError> {
        let balance = self.balance_mut(account)?;
        *balance = balance
            .checked_add(amount)
            .ok_or(BankError::BalanceOverflow)?;
        Ok(())
    }
}
