use thiserror::Error;

use crate::utf8::Utf8Error;

/// Fatal conditions that abort a tokenize call.
///
/// No partial [`TokenList`](crate::TokenList) is ever returned alongside one of
/// these.
#[derive(Error, Debug)]
pub enum TokenizeError {
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("match group {group} out of range: pattern has {groups} groups")]
    MatchGroupOutOfRange { group: usize, groups: usize },
    #[error("pattern matched an empty span at byte {offset}")]
    ZeroWidthMatch { offset: usize },
    #[error("match {start}..{end} starts before the end of the previous token at byte {cursor}")]
    RegressingMatch {
        start: usize,
        end: usize,
        cursor: usize,
    },
    #[error("span {start}..{end} is out of bounds for a buffer of {len} bytes")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },
    #[error("token pushed at position {found}, expected {expected}")]
    PositionMismatch { expected: usize, found: usize },
    #[error("token at position {position} is empty")]
    EmptyToken { position: usize },
    #[error("token at position {position} was cut from a different buffer")]
    ForeignSource { position: usize },
    #[error("token at position {position} starts at byte {found}, expected {expected}")]
    NonContiguousToken {
        position: usize,
        expected: usize,
        found: usize,
    },
    #[error("token at position {position} has code point offset {found}, expected {expected}")]
    CodepointOffsetMismatch {
        position: usize,
        expected: usize,
        found: usize,
    },
    #[error("tokens cover {covered} of {len} bytes")]
    IncompleteCoverage { covered: usize, len: usize },
    #[error(transparent)]
    InvalidUtf8(#[from] Utf8Error),
}
