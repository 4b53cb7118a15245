//! Application core — session rules, zero I/O.
//!
//! The controller in [`service`] talks to the bank, the cash dispenser
//! and the card reader only through the **port traits** in [`ports`],
//! so it runs unchanged against in-memory mocks or real devices.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
