//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing session events to the `log`
//! facade, tagged with the terminal id.  An audit-journal adapter would
//! implement the same trait.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] as a single line.
pub struct LogEventSink {
    terminal_id: String,
    emitted: u64,
}

impl LogEventSink {
    pub fn new(terminal_id: impl Into<String>) -> Self {
        Self {
            terminal_id: terminal_id.into(),
            emitted: 0,
        }
    }

    /// Events written so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        self.emitted += 1;
        let t = &self.terminal_id;
        match event {
            AppEvent::StateChanged { from, to } => info!("{t} STATE | {from} -> {to}"),
            AppEvent::CardInserted(card) => info!("{t} CARD  | inserted {card}"),
            AppEvent::PinChecked { card, accepted } => info!(
                "{t} PIN   | {card} {}",
                if *accepted { "accepted" } else { "rejected" }
            ),
            AppEvent::AccountSelected(account) => info!("{t} ACCT  | selected {account}"),
            AppEvent::BalanceReported { account, balance } => {
                info!("{t} BAL   | {account} = {balance}");
            }
            AppEvent::Deposited { account, amount } => info!("{t} DEP   | {account} +{amount}"),
            AppEvent::Withdrawn { account, amount } => info!("{t} WDR   | {account} -{amount}"),
            AppEvent::CardEjected => info!("{t} CARD  | ejected"),
        }
    }
}
