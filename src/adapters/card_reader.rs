//! Simulated card readers.
//!
//! - [`FixedCardReader`] always reports the same card, like a reader with
//!   one card permanently at the slot.
//! - [`QueuedCardReader`] feeds a queue of cards, one per insertion;
//!   ejecting frees the slot for the next one.

use std::collections::VecDeque;

use log::debug;

use crate::app::ports::{CardReader, ReaderError};
use crate::fsm::context::CardId;

#[derive(Debug, Clone)]
pub struct FixedCardReader {
    card: CardId,
    ejects: u32,
}

impl FixedCardReader {
    pub fn new(card: CardId) -> Self {
        Self { card, ejects: 0 }
    }

    /// Number of eject commands received.
    pub fn ejects(&self) -> u32 {
        self.ejects
    }
}

impl CardReader for FixedCardReader {
    fn read_card(&mut self) -> Result<CardId, ReaderError> {
        Ok(self.card.clone())
    }

    fn eject_card(&mut self) {
        self.ejects += 1;
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueuedCardReader {
    waiting: VecDeque<CardId>,
    in_slot: Option<CardId>,
    ejected: Vec<CardId>,
}

impl QueuedCardReader {
    pub fn new(cards: impl IntoIterator<Item = CardId>) -> Self {
        Self {
            waiting: cards.into_iter().collect(),
            in_slot: None,
            ejected: Vec::new(),
        }
    }

    /// Cards pushed back out, oldest first.
    pub fn ejected(&self) -> &[CardId] {
        &self.ejected
    }

    pub fn remaining(&self) -> usize {
        self.waiting.len()
    }
}

impl CardReader for QueuedCardReader {
    fn read_card(&mut self) -> Result<CardId, ReaderError> {
        if self.in_slot.is_none() {
            self.in_slot = self.waiting.pop_front();
        }
        self.in_slot.clone().ok_or(ReaderError::NoCard)
    }

    fn eject_card(&mut self) {
        match self.in_slot.take() {
            Some(card) => {
                debug!("Reader: ejecting {}", card);
                self.ejected.push(card);
            }
            None => debug!("Reader: eject with empty slot"),
        }
    }
}
