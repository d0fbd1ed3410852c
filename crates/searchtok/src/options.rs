/// Configuration for a [`Tokenizer`](crate::Tokenizer).
///
/// # Examples
///
/// ```rust
/// use searchtok::{Tokenizer, TokenizerOptions};
///
/// let options = TokenizerOptions {
///     match_group: 1,
///     ..Default::default()
/// };
/// let tokenizer = Tokenizer::with_pattern(r"(?:^|\s)(\w+)", options).unwrap();
/// let list = tokenizer.tokenize("one two", None).unwrap();
/// assert_eq!(list.num_matches(), 2);
/// ```
///
/// # Default
///
/// Group `0`, no validation, no per-token tracing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Which capture group of the word pattern delimits a match.
    ///
    /// Group `0` is the whole match. A higher group lets the pattern carry
    /// leading or trailing context that should end up in the neighbouring
    /// gap tokens instead.
    ///
    /// # Default
    ///
    /// `0`
    pub match_group: usize,

    /// Whether to check that the input is well-formed UTF-8 before scanning.
    ///
    /// Without this, malformed input still tokenizes but code point counts
    /// are unspecified. Enable it for untrusted input.
    ///
    /// # Default
    ///
    /// `false`
    pub validate_utf8: bool,

    /// Whether to emit a `trace` event for every constructed token.
    ///
    /// # Default
    ///
    /// `false`
    pub trace_tokens: bool,
}
