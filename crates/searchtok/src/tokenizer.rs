//! The single-pass tokenizer engine.
//!
//! Overview
//! - Walks the buffer once, asking the word [`Pattern`] for the next match
//!   starting at the end of the previous token.
//! - Emits a gap token for any unmatched bytes before a match, then the match
//!   token itself, then a trailing gap for whatever follows the last match.
//! - Every token is classified for sentence boundaries on construction; match
//!   tokens are additionally handed to the [`HeatSeeker`], if any, before
//!   being appended.
//! - Code point offsets are carried forward token by token, so no byte is
//!   decoded more than once.
//!
//! Failure
//! - Any contract violation by the pattern (empty span, span behind the
//!   cursor, span past the end) aborts the call; no partial list is returned.
//!
//! Notes
//! - The input is copied once into a shared `Arc<[u8]>` that every token
//!   borrows from, so tokens stay valid for as long as anyone holds them. Use
//!   [`Tokenizer::tokenize_shared`] to hand over an existing buffer without
//!   the copy.

use alloc::sync::Arc;

use crate::{
    error::TokenizeError,
    heat::HeatSeeker,
    options::TokenizerOptions,
    pattern::{Pattern, RegexPattern, Span},
    token::Token,
    token_list::{TokenList, TokenListBuilder},
    utf8::validate_utf8,
};

/// A reusable tokenizer: a compiled word pattern plus options.
///
/// ```rust
/// use searchtok::{HeatSeeker, RegexPattern, Tokenizer, TokenizerOptions};
///
/// let tokenizer = Tokenizer::with_pattern(r"\w+", TokenizerOptions::default()).unwrap();
/// let heat = RegexPattern::compile("dog").unwrap();
/// let list = tokenizer
///     .tokenize("cat dog", Some(HeatSeeker::Pattern(&heat)))
///     .unwrap();
/// assert_eq!(list.heat(), &[2]);
/// assert_eq!(list.sentence_starts(), &[0]);
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer<P: Pattern = RegexPattern> {
    pattern: P,
    options: TokenizerOptions,
}

impl Tokenizer<RegexPattern> {
    /// Compiles `pattern` as the word pattern.
    ///
    /// # Errors
    ///
    /// Fails if `pattern` does not compile or lacks `options.match_group`.
    pub fn with_pattern(pattern: &str, options: TokenizerOptions) -> Result<Self, TokenizeError> {
        Self::new(RegexPattern::compile(pattern)?, options)
    }
}

impl<P: Pattern> Tokenizer<P> {
    /// Creates a tokenizer around an already compiled pattern.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizeError::MatchGroupOutOfRange`] if the pattern has no
    /// group `options.match_group`.
    pub fn new(pattern: P, options: TokenizerOptions) -> Result<Self, TokenizeError> {
        check_group(&pattern, options.match_group)?;
        Ok(Self { pattern, options })
    }

    #[must_use]
    pub fn pattern(&self) -> &P {
        &self.pattern
    }

    #[must_use]
    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Tokenizes `text`, copying it once into storage shared by the tokens.
    ///
    /// # Errors
    ///
    /// See [`TokenizeError`]. All errors are fatal for the call.
    pub fn tokenize(
        &self,
        text: impl AsRef<[u8]>,
        heat: Option<HeatSeeker<'_>>,
    ) -> Result<TokenList, TokenizeError> {
        self.tokenize_shared(Arc::from(text.as_ref()), heat)
    }

    /// Tokenizes a buffer the caller already holds in an `Arc`.
    ///
    /// # Errors
    ///
    /// See [`TokenizeError`]. All errors are fatal for the call.
    pub fn tokenize_shared(
        &self,
        buffer: Arc<[u8]>,
        heat: Option<HeatSeeker<'_>>,
    ) -> Result<TokenList, TokenizeError> {
        if self.options.validate_utf8 {
            validate_utf8(&buffer)?;
        }
        scan(&self.pattern, buffer, heat, &self.options)
    }
}

/// Tokenizes `text` with `word_pattern`, using capture `match_group` as the
/// match span.
///
/// # Errors
///
/// See [`TokenizeError`]. The group is checked before scanning begins.
pub fn tokenize<P: Pattern + ?Sized>(
    text: impl AsRef<[u8]>,
    word_pattern: &P,
    heat: Option<HeatSeeker<'_>>,
    match_group: usize,
) -> Result<TokenList, TokenizeError> {
    let options = TokenizerOptions {
        match_group,
        ..TokenizerOptions::default()
    };
    check_group(word_pattern, match_group)?;
    scan(word_pattern, Arc::from(text.as_ref()), heat, &options)
}

fn check_group<P: Pattern + ?Sized>(pattern: &P, group: usize) -> Result<(), TokenizeError> {
    let groups = pattern.group_count();
    if group >= groups {
        return Err(TokenizeError::MatchGroupOutOfRange { group, groups });
    }
    Ok(())
}

#[tracing::instrument(level = "debug", skip_all, fields(len = buffer.len(), group = options.match_group))]
fn scan<P: Pattern + ?Sized>(
    pattern: &P,
    buffer: Arc<[u8]>,
    mut heat: Option<HeatSeeker<'_>>,
    options: &TokenizerOptions,
) -> Result<TokenList, TokenizeError> {
    let len = buffer.len();
    let mut scanner = Scan {
        buffer: Arc::clone(&buffer),
        builder: TokenListBuilder::default(),
        codepoint_offset: 0,
        trace: options.trace_tokens,
    };
    let mut prev_end = 0;

    while let Some(span) = pattern.next_match(&buffer, prev_end, options.match_group) {
        if span.end > len {
            return Err(TokenizeError::SpanOutOfBounds {
                start: span.start,
                end: span.end,
                len,
            });
        }
        if span.start < prev_end {
            return Err(TokenizeError::RegressingMatch {
                start: span.start,
                end: span.end,
                cursor: prev_end,
            });
        }
        if span.is_empty() {
            return Err(TokenizeError::ZeroWidthMatch { offset: span.start });
        }

        if span.start > prev_end {
            let gap = scanner.cut(Span::new(prev_end, span.start), false)?;
            scanner.push(gap)?;
        }

        let mut token = scanner.cut(span, true)?;
        if let Some(seeker) = heat.as_mut() {
            seeker.seek(&mut token);
        }
        scanner.push(token)?;

        prev_end = span.end;
    }

    if prev_end < len {
        let tail = scanner.cut(Span::new(prev_end, len), false)?;
        scanner.push(tail)?;
    }

    let list = scanner.builder.finish()?;
    tracing::debug!(tokens = list.len(), hot = list.heat().len(), "tokenized");
    Ok(list)
}

/// Per-call scan state.
struct Scan {
    buffer: Arc<[u8]>,
    builder: TokenListBuilder,
    codepoint_offset: usize,
    trace: bool,
}

impl Scan {
    fn cut(&mut self, span: Span, is_match: bool) -> Result<Token, TokenizeError> {
        let token = Token::new(
            Arc::clone(&self.buffer),
            span,
            self.builder.next_position(),
            self.codepoint_offset,
            is_match,
        )?;
        self.codepoint_offset += token.codepoint_len();
        Ok(token)
    }

    fn push(&mut self, token: Token) -> Result<(), TokenizeError> {
        if self.trace {
            tracing::trace!(
                position = token.position(),
                offset = token.offset(),
                bytes = token.byte_len(),
                chars = token.codepoint_len(),
                is_match = token.is_match(),
                is_hot = token.is_hot(),
                text = ?token.text(),
                "token"
            );
        }
        self.builder.push(token)
    }
}
