//! The pattern-match adapter.
//!
//! The tokenizer does not care which engine finds word boundaries; it only
//! asks for "the next span at or after this offset". [`Pattern`] is that seam,
//! and [`RegexPattern`] is the stock implementation on top of
//! `regex::bytes::Regex`.

use core::{fmt, ops::Range};

use regex::bytes::Regex;

use crate::{error::TokenizeError, utf8::sequence_len};

/// A half-open byte range `[start, end)` within a buffer.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    #[inline]
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(r: Range<usize>) -> Self {
        Self::new(r.start, r.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A compiled match pattern.
///
/// Implementations must be deterministic and leftmost-first, and must never
/// return a span that starts before `from`. The tokenizer checks these
/// properties and fails the call if they are violated.
///
/// Implementations holding mutable scan state must not be shared between
/// concurrent tokenize calls.
pub trait Pattern {
    /// Finds the span of capture `group` in the leftmost match at or after
    /// byte `from`, or `None` when there are no further matches.
    fn next_match(&self, haystack: &[u8], from: usize, group: usize) -> Option<Span>;

    /// Number of capture groups, counting the implicit whole-match group 0.
    fn group_count(&self) -> usize;

    /// Returns `true` if the pattern matches anywhere in `haystack`.
    fn is_match(&self, haystack: &[u8]) -> bool {
        self.next_match(haystack, 0, 0).is_some()
    }
}

/// A [`Pattern`] backed by the `regex` crate.
#[derive(Debug, Clone)]
pub struct RegexPattern {
    regex: Regex,
}

impl RegexPattern {
    /// Compiles `pattern` into a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizeError::InvalidPattern`] if `pattern` is not a valid
    /// regular expression.
    pub fn compile(pattern: &str) -> Result<Self, TokenizeError> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Wraps an already compiled regex.
    #[must_use]
    pub fn from_regex(regex: Regex) -> Self {
        Self { regex }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    #[must_use]
    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }
}

impl Pattern for RegexPattern {
    fn next_match(&self, haystack: &[u8], from: usize, group: usize) -> Option<Span> {
        if group == 0 {
            return self
                .regex
                .find_at(haystack, from)
                .map(|m| Span::new(m.start(), m.end()));
        }

        let mut at = from;
        while at <= haystack.len() {
            let caps = self.regex.captures_at(haystack, at)?;
            if let Some(m) = caps.get(group) {
                return Some(Span::new(m.start(), m.end()));
            }
            // The group sat out this match; resume after it.
            let whole = caps.get(0)?;
            at = if whole.is_empty() {
                whole.end() + haystack.get(whole.end()).map_or(1, |&b| sequence_len(b))
            } else {
                whole.end()
            };
        }
        None
    }

    fn group_count(&self) -> usize {
        self.regex.captures_len()
    }

    fn is_match(&self, haystack: &[u8]) -> bool {
        self.regex.is_match(haystack)
    }
}

impl fmt::Display for RegexPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.regex.as_str())
    }
}
