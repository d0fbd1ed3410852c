#![no_main]
use std::cell::RefCell;

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use searchtok::{HeatSeeker, RegexPattern, Token, Tokenizer, TokenizerOptions, validate_utf8};

const HEADER: usize = 2; // pattern selector + heat selector

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

/// Fragments the mutator glues together: words, separators, sentence
/// punctuation and multi-byte scalars of every width.
static FRAGMENT_TABLE: &[&[u8]] = &[
    b"The",
    b"quick",
    b"fox",
    b" ",
    b"  ",
    b"\t",
    b"\n",
    b".",
    b"?",
    b"!",
    b";",
    b",",
    "¿".as_bytes(),
    "Qué".as_bytes(),
    "café".as_bytes(),
    "Ωmega".as_bytes(),
    "日本語".as_bytes(),
    "😀".as_bytes(),
    "\u{3000}".as_bytes(),
];

/// Word patterns paired with the capture group that delimits a match.
static PATTERNS: &[(&str, usize)] = &[
    (r"\w+", 0),
    (r"\S+", 0),
    (r"[aeiou]+", 0),
    (r"(?:^|\s)(\w+)", 1),
    (r"\p{Lu}\p{Ll}*", 0),
    (r"[.?!;]+|(\w+)", 1),
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.random::<u8>());
        data[1] = with_rng(|rng| rng.random::<u8>());

        let mut written = HEADER;
        let target = with_rng(|rng| rng.random_range(HEADER..=max_size.max(HEADER)));
        while written < target {
            let frag = with_rng(|rng| FRAGMENT_TABLE[rng.random_range(0..FRAGMENT_TABLE.len())]);
            if written + frag.len() > max_size {
                break;
            }
            data[written..written + frag.len()].copy_from_slice(frag);
            written += frag.len();
        }
        written
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    pattern: u8,
    heat: u8,
    text: &'a [u8],
}

fn check(data: &[u8]) {
    let Ok(input) = Input::arbitrary_take_rest(Unstructured::new(data)) else {
        return;
    };
    let (source, group) = PATTERNS[input.pattern as usize % PATTERNS.len()];
    let tokenizer = Tokenizer::with_pattern(
        source,
        TokenizerOptions {
            match_group: group,
            ..Default::default()
        },
    )
    .expect("fuzz patterns compile");
    let valid = validate_utf8(input.text).is_ok();

    let heat = RegexPattern::compile(match input.heat % 3 {
        0 => "o",
        1 => "(?i)^the$",
        _ => r"\p{Han}",
    })
    .unwrap();
    let mut matches_seen = 0usize;
    let mut cb = |t: &mut Token| {
        matches_seen += 1;
        if heat.as_regex().is_match(t.as_bytes()) {
            t.set_hot(true);
        }
    };
    let seeker = if input.heat & 0x80 == 0 {
        HeatSeeker::Pattern(&heat)
    } else {
        HeatSeeker::Callback(&mut cb)
    };

    let list = tokenizer
        .tokenize(input.text, Some(seeker))
        .expect("non-empty patterns never fail");

    assert_eq!(list.to_bstring(), input.text);
    let mut offset = 0;
    for (i, tok) in list.iter().enumerate() {
        assert_eq!(tok.position(), i);
        assert_eq!(tok.offset(), offset);
        assert!(tok.byte_len() > 0);
        assert!(tok.codepoint_len() <= tok.byte_len());
        if valid {
            assert_eq!(
                tok.codepoint_len() == tok.byte_len(),
                tok.as_bytes().is_ascii()
            );
        }
        assert!(!(tok.is_sentence_start() && tok.is_sentence_end()));
        offset += tok.byte_len();
    }
    assert_eq!(list.heat().len(), list.sentence_starts().len());
    for (&hot, &start) in list.heat().iter().zip(list.sentence_starts()) {
        assert!(start <= hot);
        assert!(list.get(hot).is_some_and(|t| t.is_match() && t.is_hot()));
    }
    if input.heat & 0x80 != 0 {
        assert_eq!(matches_seen, list.num_matches());
    }
}

fuzz_target!(|data: &[u8]| check(data));
