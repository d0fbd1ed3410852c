//! Cheap sentence-boundary heuristics.
//!
//! These look at a single token in isolation. They are not grammar-aware and
//! are expected to misfire on abbreviations, quoted speech and the like.

use crate::utf8::{decode_codepoint, is_ascii};

/// U+00BF INVERTED QUESTION MARK, which opens Spanish questions.
const INVERTED_QUESTION_MARK: u32 = 0xBF;

/// How a token relates to sentence boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// The token looks like it opens a sentence.
    Start,
    /// The token looks like it closes a sentence.
    End,
    /// Neither.
    None,
}

/// Returns `true` if `text` begins with an uppercase letter or `¿`.
#[must_use]
pub fn looks_like_sentence_start(text: &[u8]) -> bool {
    let Some(&first) = text.first() else {
        return false;
    };
    if is_ascii(&text[..1]) {
        return first.is_ascii_uppercase();
    }
    let cp = decode_codepoint(text);
    cp == INVERTED_QUESTION_MARK || char::from_u32(cp).is_some_and(char::is_uppercase)
}

/// Returns `true` if `text` contains any of `. ? ! ;`.
///
/// Only ASCII punctuation is considered.
#[must_use]
pub fn looks_like_sentence_end(text: &[u8]) -> bool {
    text.iter().any(|b| matches!(b, b'.' | b'?' | b'!' | b';'))
}

/// Classifies `text`, checking for a start before an end.
///
/// A token is never both: if it looks like a start the end check is skipped.
#[must_use]
pub fn classify(text: &[u8]) -> Boundary {
    if looks_like_sentence_start(text) {
        Boundary::Start
    } else if looks_like_sentence_end(text) {
        Boundary::End
    } else {
        Boundary::None
    }
}
