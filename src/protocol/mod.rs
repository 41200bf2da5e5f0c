//! Wire protocol spoken between two agents over the serial link.
//!
//! Sentences look like `$<payload>*<XX>\n` where `XX` is the XOR of every
//! payload byte in hex. Four payloads exist:
//!
//! | id  | fields                       | purpose                    |
//! |-----|------------------------------|----------------------------|
//! | COO | row, col                     | a guess                    |
//! | HIT | row, col, outcome code       | answer to a guess          |
//! | CHA | encryptedGuess, hash         | turn order commitment      |
//! | DET | guess, encryptionKey         | turn order reveal          |

use core::fmt;

use crate::core::GuessData;

pub mod checksum;
pub mod codec;
pub mod negotiation;
pub mod parser;

pub use checksum::checksum;
pub use codec::{encode_cha, encode_coo, encode_det, encode_hit, EncodeError};
pub use negotiation::{NegotiationData, TurnOrder};
pub use parser::Parser;

/// A decoded sentence payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Coordinate of a guess.
    Coo(GuessData),
    /// Outcome of the peer's guess.
    Hit(GuessData),
    /// Commitment published before turn order is decided.
    Cha { encrypted_guess: u16, hash: u8 },
    /// Reveal of the values behind an earlier commitment.
    Det { guess: u16, encryption_key: u16 },
}

/// Result of feeding one character to the [`Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserStatus {
    /// Waiting for the starting `$` of a sentence.
    Waiting,
    /// Inside a sentence, nothing complete yet.
    Good,
    /// A full sentence was verified and decoded.
    Parsed(Message),
}

/// Reasons a sentence is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// A checksum character was not a hex digit.
    InvalidHexDigit(u8),
    /// The transmitted checksum does not match the payload.
    ChecksumMismatch { expected: u8, computed: u8 },
    /// Something other than `\n` followed the checksum.
    MissingNewline(u8),
    /// The payload outgrew the receive buffer.
    PayloadTooLong,
    /// The identifier matches none of the four sentence kinds.
    UnknownSentence,
    /// The identifier was recognised but its fields were not.
    MalformedPayload,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidHexDigit(b) => {
                write!(f, "Invalid checksum digit 0x{:02X}", b)
            }
            ParseError::ChecksumMismatch { expected, computed } => write!(
                f,
                "Checksum mismatch: sentence carries {:02X}, payload hashes to {:02X}",
                expected, computed
            ),
            ParseError::MissingNewline(b) => {
                write!(f, "Expected newline after checksum, got 0x{:02X}", b)
            }
            ParseError::PayloadTooLong => write!(f, "Sentence payload too long"),
            ParseError::UnknownSentence => write!(f, "Unknown sentence identifier"),
            ParseError::MalformedPayload => write!(f, "Malformed sentence payload"),
        }
    }
}
