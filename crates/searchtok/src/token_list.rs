//! The ordered result of one tokenize call.
//!
//! Overview
//! - Tokens are stored behind `Arc`s in storage shared by every clone of a
//!   [`TokenList`]. Cloning a list is how a caller retains it; dropping is how
//!   it releases it. Each clone carries its own iteration cursor.
//! - A single token can be retained independently with
//!   [`TokenList::get_shared`] and outlive every list that holds it.
//!
//! Invariants
//! - `tokens[i].position() == i`.
//! - Token spans tile the source buffer in order, with no holes or overlaps.
//! - `heat().len() == sentence_starts().len()`; entry `i` of the latter is the
//!   position of the latest sentence-start token at or before `heat()[i]`, or
//!   `0` if none was seen.

use alloc::{sync::Arc, vec::Vec};
use core::{fmt, ops::Range};

use bstr::BString;

use crate::{error::TokenizeError, token::Token};

#[derive(Debug, Default)]
struct Shared {
    tokens: Vec<Arc<Token>>,
    heat: Vec<usize>,
    sentence_starts: Vec<usize>,
}

/// An ordered, shareable list of [`Token`]s with a forward/backward cursor.
///
/// Iterating the list itself (`Iterator::next`) advances its cursor and stops
/// at the end; it never wraps. Use [`TokenList::iter`] to walk the tokens
/// without touching the cursor.
#[derive(Debug, Clone, Default)]
pub struct TokenList {
    shared: Arc<Shared>,
    cursor: usize,
}

impl TokenList {
    /// Builds a list from tokens already in document order, deriving the heat
    /// and sentence-start arrays from the tokens' flags.
    ///
    /// # Errors
    ///
    /// Fails if the tokens do not tile a single buffer in order. See
    /// [`TokenListBuilder::push`] and [`TokenListBuilder::finish`].
    pub fn from_tokens<I: IntoIterator<Item = Token>>(tokens: I) -> Result<Self, TokenizeError> {
        let tokens = tokens.into_iter();
        let mut builder = TokenListBuilder::with_capacity(tokens.size_hint().0);
        for token in tokens {
            builder.push(token)?;
        }
        builder.finish()
    }

    /// Number of tokens.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.tokens.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.tokens.is_empty()
    }

    /// Returns the token at `position`.
    #[inline]
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Token> {
        self.shared.tokens.get(position).map(as_token)
    }

    /// Returns a shared handle to the token at `position`, retaining it
    /// independently of this list.
    #[must_use]
    pub fn get_shared(&self, position: usize) -> Option<Arc<Token>> {
        self.shared.tokens.get(position).cloned()
    }

    /// Positions of hot tokens, in document order.
    #[inline]
    #[must_use]
    pub fn heat(&self) -> &[usize] {
        &self.shared.heat
    }

    /// For each entry of [`heat`](Self::heat), the position of the sentence
    /// start that precedes it.
    #[inline]
    #[must_use]
    pub fn sentence_starts(&self) -> &[usize] {
        &self.shared.sentence_starts
    }

    /// Current cursor position.
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor back one token and returns that token.
    pub fn prev(&mut self) -> Option<Arc<Token>> {
        self.cursor = self.cursor.checked_sub(1)?;
        self.get_shared(self.cursor)
    }

    /// Rewinds the cursor to the first token.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor to `position`, clamped to the end of the list.
    pub fn seek(&mut self, position: usize) {
        self.cursor = position.min(self.len());
    }

    /// Iterates all tokens without moving the cursor.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Token> + '_ {
        self.shared.tokens.iter().map(as_token)
    }

    /// Iterates match tokens only.
    pub fn matches(&self) -> impl Iterator<Item = &Token> + '_ {
        self.iter().filter(|t| t.is_match())
    }

    #[must_use]
    pub fn num_matches(&self) -> usize {
        self.matches().count()
    }

    /// The positions within `size` tokens either side of `position`, clamped
    /// to the list. Used to cut snippet context around a heat position.
    #[must_use]
    pub fn window(&self, position: usize, size: usize) -> Range<usize> {
        let len = self.len();
        if len == 0 {
            return 0..0;
        }
        let center = position.min(len - 1);
        center.saturating_sub(size)..center.saturating_add(size).saturating_add(1).min(len)
    }

    /// Concatenates the text of the tokens in `range`.
    #[must_use]
    pub fn text_of(&self, range: Range<usize>) -> BString {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        let mut out = Vec::new();
        for tok in &self.shared.tokens[start..end] {
            out.extend_from_slice(tok.as_bytes());
        }
        BString::from(out)
    }

    /// Reassembles the whole source buffer from the tokens.
    #[must_use]
    pub fn to_bstring(&self) -> BString {
        self.text_of(0..self.len())
    }
}

impl Iterator for TokenList {
    type Item = Arc<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.get_shared(self.cursor)?;
        self.cursor += 1;
        Some(token)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len().saturating_sub(self.cursor);
        (remaining, Some(remaining))
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = core::iter::Map<core::slice::Iter<'a, Arc<Token>>, fn(&Arc<Token>) -> &Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.shared.tokens.iter().map(as_token as fn(&Arc<Token>) -> &Token)
    }
}

fn as_token(token: &Arc<Token>) -> &Token {
    token
}

impl fmt::Display for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tok in self {
            writeln!(f, "{tok}")?;
        }
        writeln!(f, "heat: {:?}", self.heat())?;
        write!(f, "sentence_starts: {:?}", self.sentence_starts())
    }
}

#[cfg(any(test, feature = "serde"))]
impl serde::Serialize for TokenList {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let tokens: Vec<&Token> = self.iter().collect();
        let mut s = serializer.serialize_struct("TokenList", 4)?;
        s.serialize_field("count", &self.len())?;
        s.serialize_field("tokens", &tokens)?;
        s.serialize_field("heat", self.heat())?;
        s.serialize_field("sentence_starts", self.sentence_starts())?;
        s.end()
    }
}

/// Accumulates tokens in document order and keeps the heat and sentence-start
/// arrays in step with them.
///
/// Every pushed token must come from the same buffer and start where the
/// previous one ended, so a finished list always tiles its buffer.
#[derive(Debug, Default)]
pub struct TokenListBuilder {
    shared: Shared,
    last_sentence_start: usize,
    source: Option<Arc<[u8]>>,
    byte_end: usize,
    codepoint_end: usize,
}

impl TokenListBuilder {
    #[must_use]
    pub fn with_capacity(tokens: usize) -> Self {
        Self {
            shared: Shared {
                tokens: Vec::with_capacity(tokens),
                ..Shared::default()
            },
            ..Self::default()
        }
    }

    /// Position the next pushed token must carry.
    #[inline]
    #[must_use]
    pub fn next_position(&self) -> usize {
        self.shared.tokens.len()
    }

    /// Appends `token`.
    ///
    /// # Errors
    ///
    /// - [`TokenizeError::EmptyToken`] if the token is empty.
    /// - [`TokenizeError::PositionMismatch`] if its position is not
    ///   [`next_position`](Self::next_position).
    /// - [`TokenizeError::ForeignSource`] if it was cut from a different
    ///   buffer than the first token.
    /// - [`TokenizeError::NonContiguousToken`] if it does not start where the
    ///   previous token ended.
    /// - [`TokenizeError::CodepointOffsetMismatch`] if its code point offset
    ///   is not the running total of the tokens before it.
    pub fn push(&mut self, token: Token) -> Result<(), TokenizeError> {
        let position = self.next_position();
        if token.byte_len() == 0 {
            return Err(TokenizeError::EmptyToken { position });
        }
        if token.position() != position {
            return Err(TokenizeError::PositionMismatch {
                expected: position,
                found: token.position(),
            });
        }
        match &self.source {
            Some(source) if !Arc::ptr_eq(source, token.source()) => {
                return Err(TokenizeError::ForeignSource { position });
            }
            Some(_) => {}
            None => self.source = Some(Arc::clone(token.source())),
        }
        if token.offset() != self.byte_end {
            return Err(TokenizeError::NonContiguousToken {
                position,
                expected: self.byte_end,
                found: token.offset(),
            });
        }
        if token.codepoint_offset() != self.codepoint_end {
            return Err(TokenizeError::CodepointOffsetMismatch {
                position,
                expected: self.codepoint_end,
                found: token.codepoint_offset(),
            });
        }

        self.byte_end = token.span().end;
        self.codepoint_end += token.codepoint_len();
        if token.is_sentence_start() {
            self.last_sentence_start = position;
        }
        if token.is_match() && token.is_hot() {
            self.shared.heat.push(position);
            self.shared.sentence_starts.push(self.last_sentence_start);
        }
        self.shared.tokens.push(Arc::new(token));
        Ok(())
    }

    /// Freezes the accumulated tokens into a list.
    ///
    /// # Errors
    ///
    /// Fails with [`TokenizeError::IncompleteCoverage`] if the tokens stop
    /// short of the end of their buffer.
    pub fn finish(self) -> Result<TokenList, TokenizeError> {
        let len = self.source.as_ref().map_or(0, |source| source.len());
        if self.byte_end != len {
            return Err(TokenizeError::IncompleteCoverage {
                covered: self.byte_end,
                len,
            });
        }
        Ok(TokenList {
            shared: Arc::new(self.shared),
            cursor: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Span;

    /// "Cat. The dog" as match/gap tokens, with "dog" hot.
    fn sample() -> TokenList {
        let src: Arc<[u8]> = Arc::from(&b"Cat. The dog"[..]);
        let spans = [(0, 3, true), (3, 5, false), (5, 8, true), (8, 9, false), (9, 12, true)];
        let mut cp = 0;
        let mut tokens = Vec::new();
        for (pos, &(start, end, is_match)) in spans.iter().enumerate() {
            let mut t = Token::new(Arc::clone(&src), Span::new(start, end), pos, cp, is_match)
                .unwrap();
            cp += t.codepoint_len();
            if t.as_bytes() == b"dog" {
                t.set_hot(true);
            }
            tokens.push(t);
        }
        TokenList::from_tokens(tokens).unwrap()
    }

    #[test]
    fn derives_heat_and_sentence_starts() {
        let list = sample();
        assert_eq!(list.len(), 5);
        assert_eq!(list.heat(), &[4]);
        assert_eq!(list.sentence_starts(), &[2]);
        assert_eq!(list.num_matches(), 3);
        assert_eq!(list.to_bstring(), "Cat. The dog");
    }

    #[test]
    fn cursor_walks_forward_and_back_without_wrapping() {
        let mut list = sample();
        let texts: Vec<_> = list.by_ref().map(|t| t.text().to_string()).collect();
        assert_eq!(texts, ["Cat", ". ", "The", " ", "dog"]);
        assert_eq!(list.cursor(), 5);
        assert!(list.next().is_none());
        assert!(list.next().is_none());

        assert_eq!(list.prev().unwrap().text(), "dog");
        assert_eq!(list.prev().unwrap().text(), " ");
        list.reset();
        assert!(list.prev().is_none());
        assert_eq!(list.next().unwrap().position(), 0);

        list.seek(99);
        assert_eq!(list.cursor(), 5);
    }

    #[test]
    fn clones_share_tokens_but_not_cursors() {
        let mut a = sample();
        let b = a.clone();
        a.next();
        assert_eq!(a.cursor(), 1);
        assert_eq!(b.cursor(), 0);
        assert!(core::ptr::eq(a.get(2).unwrap(), b.get(2).unwrap()));
    }

    #[test]
    fn retained_token_outlives_list() {
        let list = sample();
        let dog = list.get_shared(4).unwrap();
        assert_eq!(Arc::strong_count(&dog), 2);
        drop(list);
        assert_eq!(Arc::strong_count(&dog), 1);
        assert_eq!(dog.text(), "dog");
    }

    #[test]
    fn window_clamps_to_list() {
        let list = sample();
        assert_eq!(list.window(4, 2), 2..5);
        assert_eq!(list.window(0, 1), 0..2);
        assert_eq!(list.window(2, 10), 0..5);
        assert_eq!(list.window(99, 0), 4..5);
        assert_eq!(list.text_of(list.window(4, 2)), "The dog");
        assert_eq!(TokenList::default().window(3, 3), 0..0);
    }

    #[test]
    fn rejects_out_of_order_positions() {
        let src: Arc<[u8]> = Arc::from(&b"ab"[..]);
        let t = Token::new(src, Span::new(0, 2), 1, 0, true).unwrap();
        assert!(matches!(
            TokenList::from_tokens([t]),
            Err(TokenizeError::PositionMismatch {
                expected: 0,
                found: 1
            })
        ));
    }

    fn cut(src: &Arc<[u8]>, span: Range<usize>, pos: usize, cp: usize, is_match: bool) -> Token {
        Token::new(Arc::clone(src), Span::from(span), pos, cp, is_match).unwrap()
    }

    #[test]
    fn rejects_tokens_out_of_byte_order() {
        let src: Arc<[u8]> = Arc::from(&b"hello world"[..]);
        let err = TokenList::from_tokens([cut(&src, 6..11, 0, 0, true)]).unwrap_err();
        assert!(matches!(
            err,
            TokenizeError::NonContiguousToken {
                position: 0,
                expected: 0,
                found: 6
            }
        ));

        let err = TokenList::from_tokens([
            cut(&src, 0..5, 0, 0, true),
            cut(&src, 6..11, 1, 5, true),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            TokenizeError::NonContiguousToken {
                position: 1,
                expected: 5,
                found: 6
            }
        ));
    }

    #[test]
    fn rejects_tokens_from_another_buffer() {
        let src: Arc<[u8]> = Arc::from(&b"hello world"[..]);
        // Same bytes, different allocation.
        let other: Arc<[u8]> = Arc::from(&b"hello world"[..]);
        let err = TokenList::from_tokens([
            cut(&src, 0..5, 0, 0, true),
            cut(&other, 5..6, 1, 5, false),
        ])
        .unwrap_err();
        assert!(matches!(err, TokenizeError::ForeignSource { position: 1 }));
    }

    #[test]
    fn rejects_wrong_codepoint_offset() {
        let src: Arc<[u8]> = Arc::from("né x".as_bytes());
        let err = TokenList::from_tokens([
            cut(&src, 0..3, 0, 0, true),
            cut(&src, 3..4, 1, 3, false),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            TokenizeError::CodepointOffsetMismatch {
                position: 1,
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn rejects_partial_coverage() {
        let src: Arc<[u8]> = Arc::from(&b"hello world"[..]);
        let err = TokenList::from_tokens([cut(&src, 0..5, 0, 0, true)]).unwrap_err();
        assert!(matches!(
            err,
            TokenizeError::IncompleteCoverage { covered: 5, len: 11 }
        ));
        assert!(TokenList::from_tokens([]).unwrap().is_empty());
    }

    #[test]
    fn hot_gap_is_not_recorded() {
        let src: Arc<[u8]> = Arc::from(&b"a, b"[..]);
        let mut gap = cut(&src, 1..3, 1, 1, false);
        gap.set_hot(true);
        let list = TokenList::from_tokens([
            cut(&src, 0..1, 0, 0, true),
            gap,
            cut(&src, 3..4, 2, 3, true),
        ])
        .unwrap();
        assert!(list.heat().is_empty());
        assert!(list.sentence_starts().is_empty());
        assert!(!list.get(1).unwrap().is_hot());
    }

    #[test]
    fn display_dump() {
        let list = sample();
        assert_eq!(
            list.to_string(),
            "0: match \"Cat\" bytes=3 chars=3 start\n\
             1: gap \". \" bytes=2 chars=2 end\n\
             2: match \"The\" bytes=3 chars=3 start\n\
             3: gap \" \" bytes=1 chars=1\n\
             4: match \"dog\" bytes=3 chars=3 hot\n\
             heat: [4]\n\
             sentence_starts: [2]"
        );
    }
}
