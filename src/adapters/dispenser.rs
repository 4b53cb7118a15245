//! In-memory cash dispenser adapter.

use log::info;

use crate::app::ports::{CashDispenser, DispenserError};

/// A cassette modelled as a single counter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDispenser {
    stock: i64,
    dispensed: i64,
}

impl InMemoryDispenser {
    pub fn new(stock: i64) -> Self {
        Self {
            stock,
            dispensed: 0,
        }
    }

    /// Cash left in the cassette.
    pub fn stock(&self) -> i64 {
        self.stock
    }

    /// Cash released since construction.
    pub fn total_dispensed(&self) -> i64 {
        self.dispensed
    }
}

impl CashDispenser for InMemoryDispenser {
    fn has_cash(&self, amount: i64) -> bool {
        amount <= self.stock
    }

    fn dispense_cash(&mut self, amount: i64) -> Result<(), DispenserError> {
        if amount > self.stock {
            return Err(DispenserError::InsufficientStock {
                requested: amount,
                available: self.stock,
            });
        }
        self.stock -= amount;
        self.dispensed += amount;
        info!("Dispensed {}, {} left in cassette", amount, self.stock);
        Ok(())
    }
}
