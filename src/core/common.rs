//! Common types shared by the field and the protocol: guesses, their
//! outcomes and field errors.

use super::field::BoatType;

/// Outcome of an attack, as carried in a HIT sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitStatus {
    #[default]
    Miss,
    Hit,
    Sunk(BoatType),
}

impl HitStatus {
    /// Wire code: miss 0, hit 1, sunk small..huge 2..5.
    pub fn code(self) -> u8 {
        match self {
            HitStatus::Miss => 0,
            HitStatus::Hit => 1,
            HitStatus::Sunk(boat) => 2 + boat.index() as u8,
        }
    }

    /// Inverse of [`HitStatus::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(HitStatus::Miss),
            1 => Some(HitStatus::Hit),
            2..=5 => BoatType::from_index((code - 2) as usize).map(HitStatus::Sunk),
            _ => None,
        }
    }

    /// True for `Hit` and every `Sunk` outcome.
    pub fn is_hit(self) -> bool {
        !matches!(self, HitStatus::Miss)
    }
}

/// A guessed coordinate plus, once resolved, its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GuessData {
    pub row: u8,
    pub col: u8,
    pub hit: HitStatus,
}

impl GuessData {
    /// An unresolved guess at (row, col).
    pub fn new(row: u8, col: u8) -> Self {
        Self {
            row,
            col,
            hit: HitStatus::Miss,
        }
    }
}

/// Errors returned by Field operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Coordinate lies outside the grid.
    OutOfBounds { row: usize, col: usize },
}

impl core::fmt::Display for FieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FieldError::OutOfBounds { row, col } => {
                write!(f, "Field position ({}, {}) is out of bounds", row, col)
            }
        }
    }
}
