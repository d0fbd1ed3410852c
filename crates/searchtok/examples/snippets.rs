//! Cuts highlighted search snippets out of a document.
//!
//! Every word matching the query is marked hot. For each hot word we print
//! the sentence it belongs to (starting at the recorded sentence start) with
//! the hit wrapped in `[...]`.
//!
//! Run with
//!
//! ```bash
//! RUST_LOG=searchtok=trace cargo run -p searchtok --example snippets -- fox
//! ```

#![allow(missing_docs)]

use regex::bytes::RegexBuilder;
use searchtok::{HeatSeeker, RegexPattern, Tokenizer, TokenizerOptions};
use tracing_subscriber::EnvFilter;

const DOCUMENT: &str = "The quick brown fox jumps over the lazy dog. \
    Nobody saw the fox again; the dog slept. \
    ¿Dónde está el zorro? Later, a fox was spotted near the river!";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let query = std::env::args().nth(1).unwrap_or_else(|| "fox".to_string());
    let heat = RegexPattern::from_regex(
        RegexBuilder::new(&format!("^{}$", regex::escape(&query)))
            .case_insensitive(true)
            .build()?,
    );
    let tokenizer = Tokenizer::with_pattern(
        r"\w+",
        TokenizerOptions {
            trace_tokens: true,
            ..Default::default()
        },
    )?;
    let list = tokenizer.tokenize(DOCUMENT, Some(HeatSeeker::Pattern(&heat)))?;

    println!(
        "{} tokens, {} matches, {} hits for {query:?}",
        list.len(),
        list.num_matches(),
        list.heat().len()
    );
    for (&hot, &start) in list.heat().iter().zip(list.sentence_starts()) {
        let mut snippet = String::new();
        for tok in list.iter().skip(start) {
            if tok.position() == hot {
                snippet.push_str(&format!("[{}]", tok.text()));
            } else {
                snippet.push_str(&tok.text().to_string());
            }
            if tok.position() > hot && tok.is_sentence_end() {
                break;
            }
        }
        println!("  #{hot}: {}", snippet.trim());
    }
    Ok(())
}
