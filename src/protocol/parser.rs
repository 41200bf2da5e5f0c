//! Streaming sentence parser, fed one character at a time.

use super::checksum::{checksum, hex_value};
use super::codec::decode_payload;
use super::{ParseError, ParserStatus};
use crate::core::PROTOCOL_MAX_PAYLOAD_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Waiting,
    Recording,
    FirstChecksumHalf,
    SecondChecksumHalf,
    Newline,
}

/// Sentence parsing automaton.
///
/// Every failure returns the parser to waiting for the next `$`, so a
/// corrupted sentence never wedges the stream.
#[derive(Debug, Clone)]
pub struct Parser {
    state: State,
    payload: [u8; PROTOCOL_MAX_PAYLOAD_LEN],
    len: usize,
    expected: u8,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: State::Waiting,
            payload: [0; PROTOCOL_MAX_PAYLOAD_LEN],
            len: 0,
            expected: 0,
        }
    }

    /// True while no sentence is in progress.
    pub fn is_waiting(&self) -> bool {
        self.state == State::Waiting
    }

    /// Drop any partial sentence.
    pub fn reset(&mut self) {
        self.state = State::Waiting;
        self.len = 0;
        self.expected = 0;
    }

    /// Consume one input character.
    pub fn decode(&mut self, input: u8) -> Result<ParserStatus, ParseError> {
        let result = self.step(input);
        if result.is_err() {
            self.reset();
        }
        result
    }

    fn step(&mut self, input: u8) -> Result<ParserStatus, ParseError> {
        match self.state {
            State::Waiting => {
                if input != b'$' {
                    return Ok(ParserStatus::Waiting);
                }
                self.len = 0;
                self.state = State::Recording;
                Ok(ParserStatus::Good)
            }
            State::Recording => {
                if input == b'*' {
                    self.state = State::FirstChecksumHalf;
                } else {
                    let slot = self
                        .payload
                        .get_mut(self.len)
                        .ok_or(ParseError::PayloadTooLong)?;
                    *slot = input;
                    self.len += 1;
                }
                Ok(ParserStatus::Good)
            }
            State::FirstChecksumHalf => {
                let high = hex_value(input).ok_or(ParseError::InvalidHexDigit(input))?;
                self.expected = high << 4;
                self.state = State::SecondChecksumHalf;
                Ok(ParserStatus::Good)
            }
            State::SecondChecksumHalf => {
                let low = hex_value(input).ok_or(ParseError::InvalidHexDigit(input))?;
                let expected = self.expected | low;
                let computed = checksum(&self.payload[..self.len]);
                if expected != computed {
                    return Err(ParseError::ChecksumMismatch { expected, computed });
                }
                self.state = State::Newline;
                Ok(ParserStatus::Good)
            }
            State::Newline => {
                if input != b'\n' {
                    return Err(ParseError::MissingNewline(input));
                }
                self.state = State::Waiting;
                let message = decode_payload(&self.payload[..self.len])?;
                Ok(ParserStatus::Parsed(message))
            }
        }
    }
}
