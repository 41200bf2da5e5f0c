//! The playing field: one grid type serving both as a player's own fleet
//! and as the knowledge overlay a player builds about the opponent.
//!
//! Own fields are mutated through [`Field::register_enemy_attack`], which
//! sees boat identities. Knowledge fields are mutated through
//! [`Field::update_knowledge`], which only ever records hit, miss and the
//! sinking reported by the opponent.

use core::fmt;
use rand::Rng;

use super::bitboard::BitBoard;
use super::common::{FieldError, GuessData, HitStatus};
use super::config::{
    BOATS, FIELD_BOAT_LIVES_HUGE, FIELD_BOAT_LIVES_LARGE, FIELD_BOAT_LIVES_MEDIUM,
    FIELD_BOAT_LIVES_SMALL, FIELD_COLS, FIELD_ROWS, NUM_BOATS,
};

/// Mask with one bit per field cell.
pub type CellMask = BitBoard<u64, FIELD_ROWS, FIELD_COLS>;

/// The four boats of a fleet, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum BoatType {
    Small,
    Medium,
    Large,
    Huge,
}

impl BoatType {
    /// Number of cells the boat occupies.
    pub const fn size(self) -> usize {
        self.index() + 3
    }

    /// Canonical starting lives.
    pub const fn lives(self) -> u8 {
        match self {
            BoatType::Small => FIELD_BOAT_LIVES_SMALL,
            BoatType::Medium => FIELD_BOAT_LIVES_MEDIUM,
            BoatType::Large => FIELD_BOAT_LIVES_LARGE,
            BoatType::Huge => FIELD_BOAT_LIVES_HUGE,
        }
    }

    /// Position in ascending size order, also the boat's status bit.
    pub const fn index(self) -> usize {
        match self {
            BoatType::Small => 0,
            BoatType::Medium => 1,
            BoatType::Large => 2,
            BoatType::Huge => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        BOATS.get(index).copied()
    }

    pub fn from_size(size: usize) -> Option<Self> {
        size.checked_sub(3).and_then(Self::from_index)
    }
}

/// Direction a boat extends in from its pivot cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoatDirection {
    North,
    East,
    South,
    West,
}

impl BoatDirection {
    pub const ALL: [BoatDirection; 4] = [
        BoatDirection::North,
        BoatDirection::East,
        BoatDirection::South,
        BoatDirection::West,
    ];

    /// (row, col) step taken per boat cell.
    fn delta(self) -> (isize, isize) {
        match self {
            BoatDirection::North => (-1, 0),
            BoatDirection::East => (0, 1),
            BoatDirection::South => (1, 0),
            BoatDirection::West => (0, -1),
        }
    }
}

/// Contents of a single field cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldPosition {
    Empty,
    /// Opponent cell never resolved.
    Unknown,
    Boat(BoatType),
    Hit,
    Miss,
}

/// Errors from [`Field::add_boat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Some cell of the boat would leave the grid.
    OutOfBounds,
    /// Some cell of the boat is not empty.
    Overlaps,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds => write!(f, "Boat placement is out of bounds"),
            PlacementError::Overlaps => write!(f, "Boat placement overlaps another boat"),
        }
    }
}

/// A rectangular grid of positions plus one life counter per boat.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    grid: [[FieldPosition; FIELD_COLS]; FIELD_ROWS],
    lives: [u8; NUM_BOATS],
}

impl Field {
    /// A field with every cell set to `p` and full boat lives.
    pub fn new(p: FieldPosition) -> Self {
        let mut field = Field {
            grid: [[p; FIELD_COLS]; FIELD_ROWS],
            lives: [0; NUM_BOATS],
        };
        field.init(p);
        field
    }

    /// Fill every cell with `p` and reset all boat lives to their maxima.
    pub fn init(&mut self, p: FieldPosition) {
        for row in self.grid.iter_mut() {
            row.fill(p);
        }
        self.lives = BOATS.map(BoatType::lives);
    }

    pub fn at(&self, row: usize, col: usize) -> Result<FieldPosition, FieldError> {
        self.grid
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .ok_or(FieldError::OutOfBounds { row, col })
    }

    /// Overwrite one cell, returning its previous contents.
    pub fn set_location(
        &mut self,
        row: usize,
        col: usize,
        p: FieldPosition,
    ) -> Result<FieldPosition, FieldError> {
        let cell = self
            .grid
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(FieldError::OutOfBounds { row, col })?;
        Ok(core::mem::replace(cell, p))
    }

    /// Remaining lives of `boat`.
    pub fn lives(&self, boat: BoatType) -> u8 {
        self.lives[boat.index()]
    }

    /// Place `boat` with its pivot at (row, col) extending in `dir`.
    ///
    /// Every cell is checked before any is written, so a failed placement
    /// leaves the field untouched.
    pub fn add_boat(
        &mut self,
        row: usize,
        col: usize,
        dir: BoatDirection,
        boat: BoatType,
    ) -> Result<(), PlacementError> {
        let (dr, dc) = dir.delta();
        let size = boat.size() as isize;
        let last_row = row as isize + dr * (size - 1);
        let last_col = col as isize + dc * (size - 1);
        let in_rows = |r: isize| (0..FIELD_ROWS as isize).contains(&r);
        let in_cols = |c: isize| (0..FIELD_COLS as isize).contains(&c);
        if !in_rows(row as isize)
            || !in_cols(col as isize)
            || !in_rows(last_row)
            || !in_cols(last_col)
        {
            return Err(PlacementError::OutOfBounds);
        }

        let cells = (0..size).map(|i| {
            (
                (row as isize + dr * i) as usize,
                (col as isize + dc * i) as usize,
            )
        });
        if cells
            .clone()
            .any(|(r, c)| self.grid[r][c] != FieldPosition::Empty)
        {
            return Err(PlacementError::Overlaps);
        }
        for (r, c) in cells {
            self.grid[r][c] = FieldPosition::Boat(boat);
        }
        Ok(())
    }

    /// Place `boat` at uniformly random pivots and directions until one fits.
    pub fn place_boat_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R, boat: BoatType) {
        loop {
            let dir = BoatDirection::ALL[rng.random_range(0..BoatDirection::ALL.len())];
            let row = rng.random_range(0..FIELD_ROWS);
            let col = rng.random_range(0..FIELD_COLS);
            if self.add_boat(row, col, dir, boat).is_ok() {
                return;
            }
        }
    }

    /// Resolve an opponent's attack against this (own) field.
    ///
    /// Fills in `guess.hit` and returns the cell's previous contents. Cells
    /// already resolved by an earlier attack report a miss and stay as they
    /// are.
    pub fn register_enemy_attack(
        &mut self,
        guess: &mut GuessData,
    ) -> Result<FieldPosition, FieldError> {
        let (row, col) = (guess.row as usize, guess.col as usize);
        let previous = self.at(row, col)?;
        match previous {
            FieldPosition::Boat(boat) => {
                let lives = &mut self.lives[boat.index()];
                *lives = lives.saturating_sub(1);
                guess.hit = if *lives == 0 {
                    HitStatus::Sunk(boat)
                } else {
                    HitStatus::Hit
                };
                self.set_location(row, col, FieldPosition::Hit)?;
            }
            FieldPosition::Hit | FieldPosition::Miss => {
                guess.hit = HitStatus::Miss;
            }
            FieldPosition::Empty | FieldPosition::Unknown => {
                guess.hit = HitStatus::Miss;
                self.set_location(row, col, FieldPosition::Miss)?;
            }
        }
        Ok(previous)
    }

    /// Record the outcome of our own attack on this (knowledge) field.
    ///
    /// Hits are marked without boat identity; a sinking zeroes that boat's
    /// lives. Misses mark the cell empty, i.e. known to hold nothing.
    pub fn update_knowledge(&mut self, guess: &GuessData) -> Result<FieldPosition, FieldError> {
        let (row, col) = (guess.row as usize, guess.col as usize);
        match guess.hit {
            HitStatus::Miss => self.set_location(row, col, FieldPosition::Empty),
            HitStatus::Hit => self.set_location(row, col, FieldPosition::Hit),
            HitStatus::Sunk(boat) => {
                let previous = self.set_location(row, col, FieldPosition::Hit)?;
                self.lives[boat.index()] = 0;
                Ok(previous)
            }
        }
    }

    /// Bit `i` is set while boat `i` (ascending size) still has lives.
    /// Zero means the whole fleet is sunk.
    pub fn boat_states(&self) -> u8 {
        BOATS
            .iter()
            .filter(|boat| self.lives(**boat) > 0)
            .fold(0, |acc, boat| acc | (1 << boat.index()))
    }

    /// Mask of every cell currently holding `p`.
    pub fn cells_matching(&self, p: FieldPosition) -> CellMask {
        CellMask::from_fn(|r, c| self.grid[r][c] == p)
    }

    /// Row-major view of the grid for renderers.
    pub fn rows(&self) -> &[[FieldPosition; FIELD_COLS]; FIELD_ROWS] {
        &self.grid
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Field {{ lives: {:?}", self.lives)?;
        for row in self.grid.iter() {
            write!(f, "  ")?;
            for cell in row.iter() {
                let ch = match cell {
                    FieldPosition::Empty => '.',
                    FieldPosition::Unknown => '?',
                    FieldPosition::Boat(boat) => (b'0' + boat.size() as u8) as char,
                    FieldPosition::Hit => 'X',
                    FieldPosition::Miss => 'o',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}
