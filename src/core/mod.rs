//! Core battleship game model (no_std compatible)
//!
//! The field model, its configuration and the guess/outcome types shared
//! with the wire protocol. Only depends on num-traits and rand, so it can
//! run on the controller as well as on a host.

pub mod bitboard;
pub mod common;
pub mod config;
pub mod field;

// Re-export commonly used types
pub use bitboard::BitBoard;
pub use common::{FieldError, GuessData, HitStatus};
pub use config::*;
pub use field::{BoatDirection, BoatType, CellMask, Field, FieldPosition, PlacementError};
