//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter       | Implements    | Backed by                     |
//! |---------------|---------------|-------------------------------|
//! | `bank`        | BankGateway   | in-memory PIN and ledger maps |
//! | `dispenser`   | CashDispenser | in-memory cash counter        |
//! | `card_reader` | CardReader    | fixed card or queued cards    |
//! | `log_sink`    | EventSink     | `log` output                  |

pub mod bank;
pub mod card_reader;
pub mod dispenser;
pub mod log_sink;
