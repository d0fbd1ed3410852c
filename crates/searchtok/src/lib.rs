//! A single-pass tokenizer for search-result highlighting.
//!
//! Given a buffer and a "word" pattern, [`tokenize`] partitions the buffer
//! into an ordered [`TokenList`] of matches and the gaps between them. Each
//! [`Token`] carries byte and code point extents plus cheap sentence-boundary
//! flags, and an optional [`HeatSeeker`] pass marks interesting ("hot")
//! matches, recording where they sit relative to the nearest sentence start so
//! callers can cut snippets around them.
//!
//! ```rust
//! use searchtok::{RegexPattern, tokenize};
//!
//! let words = RegexPattern::compile(r"\w+").unwrap();
//! let list = tokenize("Hello world.", &words, None, 0).unwrap();
//! let texts: Vec<String> = list.iter().map(|t| t.text().to_string()).collect();
//! assert_eq!(texts, ["Hello", " ", "world", "."]);
//! assert!(list.get(0).unwrap().is_sentence_start());
//! assert!(list.get(3).unwrap().is_sentence_end());
//! ```

#![allow(missing_docs)]
extern crate alloc;

mod error;
mod heat;
mod options;
mod pattern;
pub mod sentence;
mod token;
mod token_list;
mod tokenizer;
pub mod utf8;

#[cfg(test)]
mod tests;

pub use error::TokenizeError;
pub use heat::{HeatSeeker, heat_offsets};
pub use options::TokenizerOptions;
pub use pattern::{Pattern, RegexPattern, Span};
pub use token::Token;
pub use token_list::{TokenList, TokenListBuilder};
pub use tokenizer::{Tokenizer, tokenize};
pub use utf8::{Utf8Error, validate_utf8};
