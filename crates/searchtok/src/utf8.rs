//! UTF-8 helpers used on the tokenizer hot path.
//!
//! The tokenizer never decodes whole tokens into `char`s. It only needs to
//! count code points and occasionally peek at the first one, so this module
//! works directly on bytes using a lead-byte length table.
//!
//! Invariants
//! - [`sequence_len`] is total: every byte value maps to 1..=4. Stray
//!   continuation bytes and the never-valid `0xF8..=0xFF` range map to 1 so a
//!   walk over malformed input always makes progress.
//! - [`codepoint_count`] never exceeds the byte length of its input.

use thiserror::Error;

/// Number of bytes in a UTF-8 sequence, indexed by its lead byte.
static SEQUENCE_LEN: [u8; 256] = build_sequence_len_table();

const fn build_sequence_len_table() -> [u8; 256] {
    let mut table = [1u8; 256];
    let mut b = 0xC0;
    while b < 0xF8 {
        table[b] = match b {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            _ => 4,
        };
        b += 1;
    }
    table
}

/// Returns the length in bytes of the UTF-8 sequence introduced by `lead`.
#[inline]
#[must_use]
pub fn sequence_len(lead: u8) -> usize {
    SEQUENCE_LEN[lead as usize] as usize
}

/// Decodes the code point at the start of `bytes`.
///
/// The input is expected to begin with a complete, valid UTF-8 sequence.
/// Malformed input yields an unspecified value (but never panics); callers
/// handling untrusted buffers should run [`validate_utf8`] first. An empty
/// slice decodes to `0`.
#[must_use]
pub fn decode_codepoint(bytes: &[u8]) -> u32 {
    let Some(&lead) = bytes.first() else {
        return 0;
    };
    let len = sequence_len(lead).min(bytes.len());
    let mut cp = match len {
        1 => return u32::from(lead),
        2 => u32::from(lead & 0x1F),
        3 => u32::from(lead & 0x0F),
        _ => u32::from(lead & 0x07),
    };
    for &b in &bytes[1..len] {
        cp = (cp << 6) | u32::from(b & 0x3F);
    }
    cp
}

/// Returns `true` if every byte is below `0x80`.
#[inline]
#[must_use]
pub fn is_ascii(bytes: &[u8]) -> bool {
    bytes.is_ascii()
}

/// Counts the code points in `bytes`.
///
/// ASCII input short-circuits to the byte length. Otherwise the buffer is
/// walked one sequence at a time using the lead-byte table, so a truncated
/// trailing sequence still counts as one code point.
#[must_use]
pub fn codepoint_count(bytes: &[u8]) -> usize {
    if is_ascii(bytes) {
        return bytes.len();
    }
    let mut idx = 0;
    let mut count = 0;
    while idx < bytes.len() {
        idx += sequence_len(bytes[idx]);
        count += 1;
    }
    count
}

/// The input is not well-formed UTF-8.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid UTF-8 sequence at byte offset {valid_up_to}")]
pub struct Utf8Error {
    /// Offset of the first byte of the first invalid sequence.
    pub valid_up_to: usize,
}

/// Checks that `bytes` is well-formed UTF-8.
///
/// On failure the error points at the first byte that does not start a valid
/// sequence, which is what callers need to report a useful diagnostic.
///
/// # Errors
///
/// Returns [`Utf8Error`] carrying the offset of the first invalid sequence.
pub fn validate_utf8(bytes: &[u8]) -> Result<(), Utf8Error> {
    match core::str::from_utf8(bytes) {
        Ok(_) => Ok(()),
        Err(e) => Err(Utf8Error {
            valid_up_to: e.valid_up_to(),
        }),
    }
}
