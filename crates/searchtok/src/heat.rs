use alloc::vec::Vec;
use core::fmt;

use crate::{pattern::Pattern, token::Token, utf8::sequence_len};

/// The secondary pass run over every match token to decide whether it is
/// "hot" (worth highlighting).
///
/// The callback form runs synchronously, in token order, before the scan
/// moves on. It may flip the token's heat with [`Token::set_hot`] and may
/// mutate whatever state it captures, but it must not re-enter the tokenizer
/// with the same pattern.
pub enum HeatSeeker<'h> {
    /// Mark the token hot if this pattern matches anywhere in its text.
    Pattern(&'h dyn Pattern),
    /// Hand the token to a visitor.
    Callback(&'h mut dyn FnMut(&mut Token)),
}

impl HeatSeeker<'_> {
    pub(crate) fn seek(&mut self, token: &mut Token) {
        match self {
            HeatSeeker::Pattern(p) => {
                if p.is_match(token.as_bytes()) {
                    token.set_hot(true);
                }
            }
            HeatSeeker::Callback(f) => f(token),
        }
    }
}

impl fmt::Debug for HeatSeeker<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeatSeeker::Pattern(_) => f.write_str("HeatSeeker::Pattern"),
            HeatSeeker::Callback(_) => f.write_str("HeatSeeker::Callback"),
        }
    }
}

impl<'h, P: Pattern> From<&'h P> for HeatSeeker<'h> {
    fn from(p: &'h P) -> Self {
        HeatSeeker::Pattern(p)
    }
}

/// Byte offsets at which `pattern` matches in `text`, without tokenizing.
///
/// Empty matches are reported once and the search steps past them.
#[must_use]
pub fn heat_offsets<P: Pattern + ?Sized>(text: &[u8], pattern: &P) -> Vec<usize> {
    let mut out = Vec::new();
    let mut from = 0;
    while from <= text.len() {
        let Some(span) = pattern.next_match(text, from, 0) else {
            break;
        };
        out.push(span.start);
        from = if span.is_empty() {
            span.end + text.get(span.end).map_or(1, |&b| sequence_len(b))
        } else {
            span.end
        };
    }
    out
}
