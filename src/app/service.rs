//! Session controller — the hexagonal core.
//!
//! [`AtmController`] owns one [`Session`] and one instance of each
//! collaborator.  It gates which collaborator calls are allowed in which
//! order and enforces the business rules (positive amounts, sufficient
//! funds, sufficient cash) before delegating.
//!
//! ```text
//!  CardReader ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │     AtmController      │
//! BankGateway ◀──▶│  Session · rules       │──▶ CashDispenser
//!                 └────────────────────────┘
//! ```
//!
//! The controller is single-threaded and synchronous.  One instance is
//! one terminal; callers sharing it across threads must wrap it in their
//! own lock.

use log::{error, info, warn};

use crate::error::{Result, SessionError};
use crate::fsm::context::{AccountId, Session};
use crate::fsm::{Operation, SessionState, log_transition};

use super::commands::{CommandOutcome, SessionCommand};
use super::events::{AppEvent, SessionStatus};
use super::ports::{BankGateway, CardReader, CashDispenser, EventSink, NullSink};

// ───────────────────────────────────────────────────────────────
// AtmController
// ───────────────────────────────────────────────────────────────

/// Drives a single terminal's card cycles.
pub struct AtmController<B, D, R, S = NullSink> {
    bank: B,
    dispenser: D,
    reader: R,
    sink: S,
    session: Session,
}

impl<B, D, R> AtmController<B, D, R>
where
    B: BankGateway,
    D: CashDispenser,
    R: CardReader,
{
    /// Build a controller in `Idle` that discards its events.
    pub fn new(bank: B, dispenser: D, reader: R) -> Self {
        Self::with_sink(bank, dispenser, reader, NullSink)
    }
}

impl<B, D, R, S> AtmController<B, D, R, S>
where
    B: BankGateway,
    D: CashDispenser,
    R: CardReader,
    S: EventSink,
{
    /// Build a controller in `Idle` that reports to `sink`.
    pub fn with_sink(bank: B, dispenser: D, reader: R, sink: S) -> Self {
        Self {
            bank,
            dispenser,
            reader,
            sink,
            session: Session::new(),
        }
    }

    // ── Card cycle ────────────────────────────────────────────

    /// Read the card in the slot and start a fresh session for it.
    ///
    /// Allowed in every state; an existing session is discarded, never
    /// stacked.  A reader failure leaves the session untouched.
    pub fn insert_card(&mut self) -> Result<()> {
        let card = self.reader.read_card().inspect_err(|e| {
            warn!("Card read failed: {}", e);
        })?;

        let prev = self.session.state();
        info!("Card inserted: {}", card);
        self.session.begin(card.clone());
        self.sink.emit(&AppEvent::CardInserted(card));
        self.note_transition(prev);
        Ok(())
    }

    /// Check `pin` against the inserted card.
    ///
    /// A wrong PIN is `Ok(false)`, not an error: the card stays in and the
    /// caller may retry.  Any selected account is dropped until the PIN is
    /// accepted again.
    pub fn enter_pin(&mut self, pin: &str) -> Result<bool> {
        let prev = self.require(Operation::EnterPin)?;
        let Some(card) = self.session.card().cloned() else {
            return Err(SessionError::NoCardInserted);
        };

        let accepted = self.bank.validate_pin(&card, pin)?;
        self.session.set_authenticated(accepted);
        if accepted {
            info!("PIN accepted for {}", card);
        } else {
            warn!("PIN rejected for {}", card);
        }
        self.sink.emit(&AppEvent::PinChecked { card, accepted });
        self.note_transition(prev);
        Ok(accepted)
    }

    /// Choose the account to transact on.
    ///
    /// The id is stored as given; the bank first sees it on the next
    /// balance, deposit or withdrawal.
    pub fn select_account(&mut self, account: AccountId) -> Result<()> {
        let prev = self.require(Operation::SelectAccount)?;
        info!("Account selected: {}", account);
        self.session.select(account.clone());
        self.sink.emit(&AppEvent::AccountSelected(account));
        self.note_transition(prev);
        Ok(())
    }

    /// Current balance of the selected account, straight from the bank.
    pub fn get_balance(&mut self) -> Result<i64> {
        let account = self.selected(Operation::GetBalance)?;
        let balance = self.bank.get_balance(&account)?;
        self.sink.emit(&AppEvent::BalanceReported { account, balance });
        Ok(balance)
    }

    /// Credit `amount` to the selected account.  No upper bound.
    pub fn deposit(&mut self, amount: i64) -> Result<()> {
        let account = self.selected(Operation::Deposit)?;
        check_amount(amount)?;

        self.bank.credit(&account, amount)?;
        info!("Deposited {} to {}", amount, account);
        self.sink.emit(&AppEvent::Deposited { account, amount });
        Ok(())
    }

    /// Debit `amount` from the selected account and release the cash.
    ///
    /// Funds are checked before stock.  The account is debited before the
    /// dispenser runs, so a dispenser fault after the debit leaves the
    /// account charged; that fault is logged and returned as
    /// [`SessionError::Dispenser`].
    pub fn withdraw(&mut self, amount: i64) -> Result<()> {
        let account = self.selected(Operation::Withdraw)?;
        check_amount(amount)?;

        let available = self.bank.get_balance(&account)?;
        if amount > available {
            warn!(
                "Withdrawal of {} refused: balance of {} is {}",
                amount, account, available
            );
            return Err(SessionError::InsufficientFunds {
                requested: amount,
                available,
            });
        }
        if !self.dispenser.has_cash(amount) {
            warn!("Withdrawal of {} refused: terminal out of cash", amount);
            return Err(SessionError::InsufficientCash { requested: amount });
        }

        self.bank.debit(&account, amount)?;
        if let Err(e) = self.dispenser.dispense_cash(amount) {
            error!(
                "Dispense of {} failed after debiting {}: {}",
                amount, account, e
            );
            return Err(e.into());
        }

        info!("Withdrew {} from {}", amount, account);
        self.sink.emit(&AppEvent::Withdrawn { account, amount });
        Ok(())
    }

    /// Eject the card and return to `Idle`.  Never fails, safe to repeat.
    pub fn eject_card(&mut self) {
        let prev = self.session.state();
        self.reader.eject_card();
        self.session.reset();
        if prev != SessionState::Idle {
            info!("Card ejected");
            self.sink.emit(&AppEvent::CardEjected);
        }
        self.note_transition(prev);
    }

    // ── Command handling ──────────────────────────────────────

    /// Run one [`SessionCommand`].
    pub fn handle_command(&mut self, cmd: SessionCommand) -> Result<CommandOutcome> {
        match cmd {
            SessionCommand::InsertCard => self.insert_card().map(|()| CommandOutcome::Done),
            SessionCommand::EnterPin(pin) => self.enter_pin(&pin).map(CommandOutcome::PinAccepted),
            SessionCommand::SelectAccount(id) => {
                self.select_account(id).map(|()| CommandOutcome::Done)
            }
            SessionCommand::GetBalance => self.get_balance().map(CommandOutcome::Balance),
            SessionCommand::Deposit(n) => self.deposit(n).map(|()| CommandOutcome::Done),
            SessionCommand::Withdraw(n) => self.withdraw(n).map(|()| CommandOutcome::Done),
            SessionCommand::EjectCard => {
                self.eject_card();
                Ok(CommandOutcome::Done)
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Snapshot of the session identifiers.
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            state: self.session.state(),
            card: self.session.card().cloned(),
            account: self.session.account().cloned(),
        }
    }

    /// Read-only access to the session fields.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn dispenser(&self) -> &D {
        &self.dispenser
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Tear down and hand the collaborators back.
    pub fn into_parts(self) -> (B, D, R, S) {
        (self.bank, self.dispenser, self.reader, self.sink)
    }

    // ── Internal ──────────────────────────────────────────────

    /// Check the state gate for `op`; returns the state on success.
    fn require(&self, op: Operation) -> Result<SessionState> {
        let state = self.session.state();
        state.require(op).inspect_err(|e| {
            warn!("{:?} refused in {}: {}", op, state, e);
        })?;
        Ok(state)
    }

    /// The selected account, if `op` is allowed.
    fn selected(&self, op: Operation) -> Result<AccountId> {
        self.require(op)?;
        self.session
            .account()
            .cloned()
            .ok_or(SessionError::NoAccountSelected)
    }

    fn note_transition(&mut self, prev: SessionState) {
        let now = self.session.state();
        if log_transition(prev, now) {
            self.sink.emit(&AppEvent::StateChanged { from: prev, to: now });
        }
    }
}

fn check_amount(amount: i64) -> Result<()> {
    if amount <= 0 {
        warn!("Rejected non-positive amount {}", amount);
        return Err(SessionError::InvalidAmount(amount));
    }
    Ok(())
}
