//! Turn order negotiation.
//!
//! Each agent commits to a random `guess` by publishing it XORed with a
//! random key, plus a hash over both. Once both commitments are exchanged
//! the keys are revealed; neither side could pick its values after seeing
//! the other's. This is game fairness, not cryptography.

use core::cmp::Ordering;
use rand::Rng;

/// One agent's negotiation values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NegotiationData {
    pub guess: u16,
    pub encryption_key: u16,
    pub encrypted_guess: u16,
    pub hash: u8,
}

/// Which agent fires first, from the point of view of `mine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOrder {
    Start,
    Defer,
    Tie,
}

/// XOR of the four bytes making up `guess` and `key`.
pub fn fold_hash(guess: u16, key: u16) -> u8 {
    let [g0, g1] = guess.to_le_bytes();
    let [k0, k1] = key.to_le_bytes();
    g0 ^ g1 ^ k0 ^ k1
}

impl NegotiationData {
    /// Build the full record for a given guess and key.
    pub fn commit(guess: u16, encryption_key: u16) -> Self {
        Self {
            guess,
            encryption_key,
            encrypted_guess: guess ^ encryption_key,
            hash: fold_hash(guess, encryption_key),
        }
    }

    /// Draw a fresh guess and key uniformly from the 16-bit range.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let encryption_key: u16 = rng.random();
        let guess: u16 = rng.random();
        Self::commit(guess, encryption_key)
    }

    /// True when the revealed guess and key reproduce the committed
    /// encrypted guess and hash.
    pub fn is_valid(&self) -> bool {
        self.guess == self.encryption_key ^ self.encrypted_guess
            && self.hash == fold_hash(self.guess, self.encryption_key)
    }
}

/// Decide who starts.
///
/// The parity of `mine.key ^ theirs.key` selects the rule: even, the
/// smaller key starts; odd, the larger key starts. Equal keys tie, since
/// both agents would otherwise compute `Defer`.
pub fn turn_order(mine: &NegotiationData, theirs: &NegotiationData) -> TurnOrder {
    let parity = (mine.encryption_key ^ theirs.encryption_key) & 1;
    match (parity, mine.encryption_key.cmp(&theirs.encryption_key)) {
        (_, Ordering::Equal) => TurnOrder::Tie,
        (0, Ordering::Less) | (1, Ordering::Greater) => TurnOrder::Start,
        _ => TurnOrder::Defer,
    }
}
