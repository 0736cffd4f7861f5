//! Core domain types for bingo.

use derive_more::{Display, Error};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Cells on a bingo card.
pub const CARD_CELLS: usize = 25;

/// Size of the number pool cards are dealt from (1..=75).
pub const NUMBER_POOL: u8 = 75;

/// Error constructing a bingo card from raw cells.
///
/// A malformed card is a data-integrity bug upstream, not a recoverable
/// runtime condition; callers are expected to propagate it, never retry.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CardError {
    /// The card does not have exactly 25 cells.
    #[display("card must have {CARD_CELLS} cells, got {got}")]
    WrongCellCount {
        /// Number of cells supplied.
        got: usize,
    },
    /// A number appears more than once on the card.
    #[display("card contains duplicate number {number}")]
    DuplicateNumber {
        /// The repeated number.
        number: u8,
    },
}

/// A 5x5 bingo card: 25 unique numbers in row-major order.
///
/// The number-to-cell mapping is assigned when the game is created and never
/// reordered after the starting player's "start" action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<u8>", try_from = "Vec<u8>")]
pub struct BingoCard {
    cells: [u8; CARD_CELLS],
}

impl BingoCard {
    /// Returns the cells in row-major order.
    pub fn cells(&self) -> &[u8; CARD_CELLS] {
        &self.cells
    }

    /// Returns the number at a cell index (0-24).
    pub fn get(&self, idx: usize) -> Option<u8> {
        self.cells.get(idx).copied()
    }

    /// Returns the cell index holding `number`, if present on the card.
    pub fn position_of(&self, number: u8) -> Option<usize> {
        self.cells.iter().position(|&cell| cell == number)
    }

    /// Deals a fresh card: 25 unique numbers drawn from `1..=pool`.
    pub fn deal<R: Rng + ?Sized>(pool: u8, rng: &mut R) -> Self {
        let mut numbers: Vec<u8> = (1..=pool).collect();
        numbers.shuffle(rng);
        numbers.truncate(CARD_CELLS);
        let mut cells = [0u8; CARD_CELLS];
        cells.copy_from_slice(&numbers);
        Self { cells }
    }

    /// Returns a copy with the same numbers in a new random arrangement,
    /// for the pre-start shuffle.
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut cells = self.cells;
        cells.shuffle(rng);
        Self { cells }
    }
}

impl From<BingoCard> for Vec<u8> {
    fn from(card: BingoCard) -> Self {
        card.cells.to_vec()
    }
}

impl TryFrom<Vec<u8>> for BingoCard {
    type Error = CardError;

    fn try_from(cells: Vec<u8>) -> Result<Self, Self::Error> {
        if cells.len() != CARD_CELLS {
            return Err(CardError::WrongCellCount { got: cells.len() });
        }
        let mut seen = HashSet::with_capacity(CARD_CELLS);
        for &number in &cells {
            if !seen.insert(number) {
                return Err(CardError::DuplicateNumber { number });
            }
        }
        let mut fixed = [0u8; CARD_CELLS];
        fixed.copy_from_slice(&cells);
        Ok(Self { cells: fixed })
    }
}

/// The set of numbers called so far, in call order.
///
/// Grows monotonically; order is irrelevant for win checks but preserved for
/// display and the bots' last-call context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkedNumbers {
    numbers: Vec<u8>,
}

impl MarkedNumbers {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `number` has been called.
    pub fn contains(&self, number: u8) -> bool {
        self.numbers.contains(&number)
    }

    /// Records a call. Idempotent: re-calling a number is a no-op so the set
    /// stays duplicate-free.
    pub fn push(&mut self, number: u8) {
        if !self.contains(number) {
            self.numbers.push(number);
        }
    }

    /// Numbers in call order.
    pub fn as_slice(&self) -> &[u8] {
        &self.numbers
    }

    /// Count of called numbers.
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    /// Whether nothing has been called yet.
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// The most recent call, if any.
    pub fn last(&self) -> Option<u8> {
        self.numbers.last().copied()
    }
}

impl FromIterator<u8> for MarkedNumbers {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut marked = Self::new();
        for number in iter {
            marked.push(number);
        }
        marked
    }
}
