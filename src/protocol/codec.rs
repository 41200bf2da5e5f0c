//! Sentence encoders and the payload decoder used by the parser.
//!
//! Encoders write into caller-supplied buffers; a buffer of
//! [`PROTOCOL_MAX_MESSAGE_LEN`](crate::core::PROTOCOL_MAX_MESSAGE_LEN) bytes
//! always suffices.

use core::fmt::{self, Write};

use super::checksum::checksum;
use super::negotiation::NegotiationData;
use super::{Message, ParseError};
use crate::core::{GuessData, HitStatus, PROTOCOL_MAX_PAYLOAD_LEN};

/// Errors returned by the encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The output buffer cannot hold the sentence.
    BufferTooSmall,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::BufferTooSmall => write!(f, "Output buffer too small for sentence"),
        }
    }
}

/// `fmt::Write` over a borrowed byte slice.
struct SliceWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> SliceWriter<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    fn push(&mut self, bytes: &[u8]) -> fmt::Result {
        let end = self.len + bytes.len();
        let dst = self.buf.get_mut(self.len..end).ok_or(fmt::Error)?;
        dst.copy_from_slice(bytes);
        self.len = end;
        Ok(())
    }
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push(s.as_bytes())
    }
}

/// Frame `payload` as `$payload*XX\n` into `out`.
fn encode_with(out: &mut [u8], payload: fmt::Arguments<'_>) -> Result<usize, EncodeError> {
    let mut scratch = [0u8; PROTOCOL_MAX_PAYLOAD_LEN];
    let mut body = SliceWriter::new(&mut scratch);
    body.write_fmt(payload)
        .map_err(|_| EncodeError::BufferTooSmall)?;
    let body_len = body.len;
    let payload = &scratch[..body_len];

    let mut w = SliceWriter::new(out);
    frame(&mut w, payload).map_err(|_| EncodeError::BufferTooSmall)?;
    Ok(w.len)
}

fn frame(w: &mut SliceWriter<'_>, payload: &[u8]) -> fmt::Result {
    w.push(b"$")?;
    w.push(payload)?;
    writeln!(w, "*{:02X}", checksum(payload))
}

/// Encode a COO (guess coordinate) sentence.
pub fn encode_coo(out: &mut [u8], data: &GuessData) -> Result<usize, EncodeError> {
    encode_with(out, format_args!("COO,{},{}", data.row, data.col))
}

/// Encode a HIT (attack outcome) sentence.
pub fn encode_hit(out: &mut [u8], data: &GuessData) -> Result<usize, EncodeError> {
    encode_with(
        out,
        format_args!("HIT,{},{},{}", data.row, data.col, data.hit.code()),
    )
}

/// Encode a CHA (commitment) sentence. Only the encrypted guess and hash
/// leave the agent.
pub fn encode_cha(out: &mut [u8], data: &NegotiationData) -> Result<usize, EncodeError> {
    encode_with(
        out,
        format_args!("CHA,{},{}", data.encrypted_guess, data.hash),
    )
}

/// Encode a DET (reveal) sentence.
pub fn encode_det(out: &mut [u8], data: &NegotiationData) -> Result<usize, EncodeError> {
    encode_with(
        out,
        format_args!("DET,{},{}", data.guess, data.encryption_key),
    )
}

impl Message {
    /// Encode this message as a full sentence into `out`.
    pub fn encode(&self, out: &mut [u8]) -> Result<usize, EncodeError> {
        match *self {
            Message::Coo(ref g) => encode_coo(out, g),
            Message::Hit(ref g) => encode_hit(out, g),
            Message::Cha {
                encrypted_guess,
                hash,
            } => encode_cha(
                out,
                &NegotiationData {
                    encrypted_guess,
                    hash,
                    ..NegotiationData::default()
                },
            ),
            Message::Det {
                guess,
                encryption_key,
            } => encode_det(
                out,
                &NegotiationData {
                    guess,
                    encryption_key,
                    ..NegotiationData::default()
                },
            ),
        }
    }
}

/// Parse exactly `N` comma separated decimal fields.
fn fields<const N: usize>(rest: Option<&str>) -> Result<[u32; N], ParseError> {
    let rest = rest.ok_or(ParseError::MalformedPayload)?;
    let mut values = [0u32; N];
    let mut parts = rest.split(',');
    for value in values.iter_mut() {
        *value = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or(ParseError::MalformedPayload)?;
    }
    if parts.next().is_some() {
        return Err(ParseError::MalformedPayload);
    }
    Ok(values)
}

fn narrow<T: TryFrom<u32>>(value: u32) -> Result<T, ParseError> {
    T::try_from(value).map_err(|_| ParseError::MalformedPayload)
}

/// Classify and decode a verified payload.
///
/// The sentence kind is chosen by the second character of the identifier
/// alone; a leading proprietary talker `P` (`PCOO`, ...) is accepted.
pub fn decode_payload(payload: &[u8]) -> Result<Message, ParseError> {
    let text = core::str::from_utf8(payload).map_err(|_| ParseError::MalformedPayload)?;
    let (id, rest) = match text.split_once(',') {
        Some((id, rest)) => (id, Some(rest)),
        None => (text, None),
    };
    let id = match id.strip_prefix('P') {
        Some(stripped) if stripped.len() == 3 => stripped,
        _ => id,
    };

    let (expected, message) = match id.as_bytes().get(1) {
        Some(b'O') => {
            let [row, col] = fields::<2>(rest)?;
            (
                "COO",
                Message::Coo(GuessData::new(narrow(row)?, narrow(col)?)),
            )
        }
        Some(b'I') => {
            let [row, col, code] = fields::<3>(rest)?;
            let hit = HitStatus::from_code(narrow(code)?).ok_or(ParseError::MalformedPayload)?;
            (
                "HIT",
                Message::Hit(GuessData {
                    row: narrow(row)?,
                    col: narrow(col)?,
                    hit,
                }),
            )
        }
        Some(b'H') => {
            let [encrypted_guess, hash] = fields::<2>(rest)?;
            (
                "CHA",
                Message::Cha {
                    encrypted_guess: narrow(encrypted_guess)?,
                    hash: narrow(hash)?,
                },
            )
        }
        Some(b'E') => {
            let [guess, encryption_key] = fields::<2>(rest)?;
            (
                "DET",
                Message::Det {
                    guess: narrow(guess)?,
                    encryption_key: narrow(encryption_key)?,
                },
            )
        }
        _ => return Err(ParseError::UnknownSentence),
    };
    if id != expected {
        return Err(ParseError::MalformedPayload);
    }
    Ok(message)
}
