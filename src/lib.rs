//! ATM terminal session controller.
//!
//! Sequences card insertion, PIN entry, account selection and the
//! balance / deposit / withdrawal loop for one terminal.  The bank, the
//! cash dispenser and the card reader sit behind port traits; the
//! in-memory adapters back the operator console and the tests.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod console;
pub mod error;
pub mod fsm;

pub use app::service::AtmController;
pub use error::{Result, SessionError};
