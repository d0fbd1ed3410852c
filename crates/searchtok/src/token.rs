use alloc::sync::Arc;
use core::fmt;

use bstr::BStr;

use crate::{
    error::TokenizeError,
    pattern::Span,
    sentence::{Boundary, classify},
    utf8::{codepoint_count, is_ascii},
};

/// One lexical unit of a tokenized buffer: either a pattern match or the gap
/// between two matches.
///
/// A token shares ownership of the buffer it was cut from, so it stays valid
/// after the [`TokenList`](crate::TokenList) that produced it is dropped.
#[derive(Clone)]
pub struct Token {
    source: Arc<[u8]>,
    span: Span,
    position: usize,
    codepoint_offset: usize,
    codepoint_len: usize,
    is_match: bool,
    is_hot: bool,
    is_sentence_start: bool,
    is_sentence_end: bool,
}

impl Token {
    /// Cuts the token at `span` out of `source` and classifies it.
    ///
    /// `position` is the token's index in its list and `codepoint_offset` the
    /// number of code points preceding it in `source`.
    ///
    /// # Errors
    ///
    /// Fails with [`TokenizeError::EmptyToken`] for an empty span and with
    /// [`TokenizeError::SpanOutOfBounds`] if `span` does not fit in `source`.
    pub fn new(
        source: Arc<[u8]>,
        span: Span,
        position: usize,
        codepoint_offset: usize,
        is_match: bool,
    ) -> Result<Self, TokenizeError> {
        if span.is_empty() {
            return Err(TokenizeError::EmptyToken { position });
        }
        if span.end > source.len() {
            return Err(TokenizeError::SpanOutOfBounds {
                start: span.start,
                end: span.end,
                len: source.len(),
            });
        }
        let bytes = &source[span.range()];
        let codepoint_len = codepoint_count(bytes);
        let (is_sentence_start, is_sentence_end) = match classify(bytes) {
            Boundary::Start => (true, false),
            Boundary::End => (false, true),
            Boundary::None => (false, false),
        };
        Ok(Self {
            source,
            span,
            position,
            codepoint_offset,
            codepoint_len,
            is_match,
            is_hot: false,
            is_sentence_start,
            is_sentence_end,
        })
    }

    /// Index of this token among all tokens of its buffer.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Byte range of this token in the source buffer.
    #[inline]
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Byte offset of this token in the source buffer.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        self.span.start
    }

    /// Code point offset of this token in the source buffer.
    #[inline]
    #[must_use]
    pub fn codepoint_offset(&self) -> usize {
        self.codepoint_offset
    }

    #[inline]
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.span.len()
    }

    #[inline]
    #[must_use]
    pub fn codepoint_len(&self) -> usize {
        self.codepoint_len
    }

    /// The token's exact bytes.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &BStr {
        BStr::new(self.as_bytes())
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.source[self.span.range()]
    }

    /// The token's text, if it is valid UTF-8.
    #[must_use]
    pub fn to_str(&self) -> Option<&str> {
        core::str::from_utf8(self.as_bytes()).ok()
    }

    #[inline]
    #[must_use]
    pub fn is_ascii(&self) -> bool {
        self.codepoint_len == self.byte_len() && is_ascii(self.as_bytes())
    }

    /// `true` for pattern matches, `false` for gaps.
    #[inline]
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.is_match
    }

    #[inline]
    #[must_use]
    pub fn is_hot(&self) -> bool {
        self.is_hot
    }

    /// Flags the token as interesting. Gaps are never hot, so this is a no-op
    /// on a gap token.
    #[inline]
    pub fn set_hot(&mut self, hot: bool) {
        self.is_hot = hot && self.is_match;
    }

    pub(crate) fn source(&self) -> &Arc<[u8]> {
        &self.source
    }

    #[inline]
    #[must_use]
    pub fn is_sentence_start(&self) -> bool {
        self.is_sentence_start
    }

    #[inline]
    #[must_use]
    pub fn is_sentence_end(&self) -> bool {
        self.is_sentence_end
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("position", &self.position)
            .field("span", &self.span)
            .field("text", &self.text())
            .field("codepoint_len", &self.codepoint_len)
            .field("is_match", &self.is_match)
            .field("is_hot", &self.is_hot)
            .field("is_sentence_start", &self.is_sentence_start)
            .field("is_sentence_end", &self.is_sentence_end)
            .finish()
    }
}

/// One-line dump: `position: kind "text" bytes=N chars=M [start] [end] [hot]`.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_match { "match" } else { "gap" };
        write!(
            f,
            "{}: {} {:?} bytes={} chars={}",
            self.position,
            kind,
            self.text(),
            self.byte_len(),
            self.codepoint_len
        )?;
        if self.is_sentence_start {
            f.write_str(" start")?;
        }
        if self.is_sentence_end {
            f.write_str(" end")?;
        }
        if self.is_hot {
            f.write_str(" hot")?;
        }
        Ok(())
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
            && self.span == other.span
            && self.is_match == other.is_match
            && self.is_hot == other.is_hot
            && self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Token {}

#[cfg(any(test, feature = "serde"))]
impl serde::Serialize for Token {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("Token", 9)?;
        s.serialize_field("position", &self.position)?;
        s.serialize_field("text", &alloc::string::String::from_utf8_lossy(self.as_bytes()))?;
        s.serialize_field("offset", &self.span.start)?;
        s.serialize_field("byte_len", &self.byte_len())?;
        s.serialize_field("codepoint_len", &self.codepoint_len)?;
        s.serialize_field("is_match", &self.is_match)?;
        s.serialize_field("is_hot", &self.is_hot)?;
        s.serialize_field("is_sentence_start", &self.is_sentence_start)?;
        s.serialize_field("is_sentence_end", &self.is_sentence_end)?;
        s.end()
    }
}
