use crate::{HeatSeeker, RegexPattern, Token, TokenList, Tokenizer, TokenizerOptions, tokenize};

fn words() -> RegexPattern {
    RegexPattern::compile(r"\w+").unwrap()
}

fn texts(list: &TokenList) -> Vec<String> {
    list.iter().map(|t| t.text().to_string()).collect()
}

#[test]
fn hello_world() {
    let list = tokenize("Hello world.", &words(), None, 0).unwrap();
    assert_eq!(texts(&list), ["Hello", " ", "world", "."]);
    let kinds: Vec<bool> = list.iter().map(Token::is_match).collect();
    assert_eq!(kinds, [true, false, true, false]);
    assert!(list.get(0).unwrap().is_sentence_start());
    assert!(list.get(3).unwrap().is_sentence_end());
    assert!(!list.get(2).unwrap().is_sentence_start());
    assert!(list.heat().is_empty());
    assert!(list.sentence_starts().is_empty());
}

#[test]
fn multibyte_word() {
    let list = tokenize("café", &words(), None, 0).unwrap();
    assert_eq!(list.len(), 1);
    let tok = list.get(0).unwrap();
    assert!(tok.is_match());
    assert_eq!(tok.byte_len(), 5);
    assert_eq!(tok.codepoint_len(), 4);
}

#[test]
fn empty_input() {
    let mut list = tokenize("", &words(), None, 0).unwrap();
    assert_eq!(list.len(), 0);
    assert!(list.is_empty());
    assert_eq!(list.cursor(), 0);
    assert!(list.next().is_none());
}

#[test]
fn heat_pattern_without_sentence_start() {
    let heat = RegexPattern::compile("dog").unwrap();
    let list = tokenize("cat dog", &words(), Some(HeatSeeker::Pattern(&heat)), 0).unwrap();
    assert_eq!(texts(&list), ["cat", " ", "dog"]);
    assert_eq!(list.heat(), &[2]);
    assert_eq!(list.sentence_starts(), &[0]);
    assert!(list.get(2).unwrap().is_hot());
    assert!(!list.get(0).unwrap().is_hot());
}

#[test]
fn inverted_question_mark() {
    let list = tokenize("¿Qué?", &words(), None, 0).unwrap();
    assert_eq!(texts(&list), ["¿", "Qué", "?"]);
    let open = list.get(0).unwrap();
    assert!(!open.is_match());
    assert!(open.is_sentence_start());
    assert_eq!(open.byte_len(), 2);
    assert_eq!(open.codepoint_len(), 1);
    assert!(list.get(1).unwrap().is_sentence_start());
    assert!(list.get(2).unwrap().is_sentence_end());
}

#[test]
fn heat_records_latest_sentence_start() {
    let heat = RegexPattern::compile("(?i)^fox$").unwrap();
    let text = "The fox ran. A fox hid. no fox here";
    let list = tokenize(text, &words(), Some(HeatSeeker::Pattern(&heat)), 0).unwrap();
    // The(0) ' '(1) fox(2) ' '(3) ran(4) '. '(5) A(6) ' '(7) fox(8) ...
    assert_eq!(list.heat(), &[2, 8, 14]);
    assert_eq!(list.sentence_starts(), &[0, 6, 6]);
    assert_eq!(list.heat().len(), list.sentence_starts().len());
}

#[test]
fn callback_runs_in_token_order_and_can_set_heat() {
    let mut order = Vec::new();
    let mut cb = |t: &mut Token| {
        order.push(t.position());
        if t.as_bytes().starts_with(b"b") {
            t.set_hot(true);
        }
    };
    let list = tokenize(
        "alpha beta gamma bravo",
        &words(),
        Some(HeatSeeker::Callback(&mut cb)),
        0,
    )
    .unwrap();
    assert_eq!(order, [0, 2, 4, 6]);
    assert_eq!(list.heat(), &[2, 6]);
    assert_eq!(list.sentence_starts(), &[0, 0]);
}

#[test]
fn callback_never_sees_gaps() {
    let mut gaps = 0;
    let mut cb = |t: &mut Token| {
        if !t.is_match() {
            gaps += 1;
        }
    };
    tokenize("  a, b;  ", &words(), Some(HeatSeeker::Callback(&mut cb)), 0).unwrap();
    assert_eq!(gaps, 0);
}

#[test]
fn leading_and_trailing_gaps() {
    let list = tokenize("  word  ", &words(), None, 0).unwrap();
    assert_eq!(texts(&list), ["  ", "word", "  "]);
    assert_eq!(list.to_bstring(), "  word  ");
}

#[test]
fn no_matches_is_one_gap() {
    let list = tokenize("... !!", &words(), None, 0).unwrap();
    assert_eq!(list.len(), 1);
    let tok = list.get(0).unwrap();
    assert!(!tok.is_match());
    assert!(tok.is_sentence_end());
}

#[test]
fn match_group_moves_context_into_gaps() {
    let tokenizer = Tokenizer::with_pattern(
        r"[\s,]([a-z]+)",
        TokenizerOptions {
            match_group: 1,
            ..Default::default()
        },
    )
    .unwrap();
    let list = tokenizer.tokenize("X one,two", None).unwrap();
    assert_eq!(texts(&list), ["X ", "one", ",", "two"]);
    let matches: Vec<String> = list.matches().map(|t| t.text().to_string()).collect();
    assert_eq!(matches, ["one", "two"]);
}

#[test]
fn codepoint_offsets_accumulate() {
    let list = tokenize("日本 語です ok", &words(), None, 0).unwrap();
    let offsets: Vec<(usize, usize)> = list
        .iter()
        .map(|t| (t.offset(), t.codepoint_offset()))
        .collect();
    assert_eq!(offsets, [(0, 0), (6, 2), (7, 3), (16, 6), (17, 7)]);
}

#[test]
fn snippet_window_around_heat() {
    let heat = RegexPattern::compile("needle").unwrap();
    let list = tokenize(
        "hay hay hay. Find the needle in the stack",
        &words(),
        Some(HeatSeeker::Pattern(&heat)),
        0,
    )
    .unwrap();
    let pos = list.heat()[0];
    let start = list.sentence_starts()[0];
    assert_eq!(list.get(start).unwrap().text(), "Find");
    assert_eq!(list.text_of(list.window(pos, 2)), "the needle in");
    assert_eq!(list.text_of(start..pos + 1), "Find the needle");
}

#[test]
fn tokenizer_is_reusable() {
    let tokenizer = Tokenizer::with_pattern(r"\S+", TokenizerOptions::default()).unwrap();
    let a = tokenizer.tokenize("a b", None).unwrap();
    let b = tokenizer.tokenize(b"x  y z".as_slice(), None).unwrap();
    assert_eq!(a.len(), 3);
    assert_eq!(b.len(), 5);
    assert_eq!(tokenizer.pattern().as_str(), r"\S+");
}

#[test]
fn tokens_outlive_list_and_input() {
    let kept = {
        let input = "short lived".to_string();
        let list = tokenize(&input, &words(), None, 0).unwrap();
        list.get_shared(2).unwrap()
    };
    assert_eq!(kept.text(), "lived");
    assert_eq!(kept.position(), 2);
}

#[test]
fn trace_option_does_not_change_output() {
    let plain = Tokenizer::with_pattern(r"\w+", TokenizerOptions::default()).unwrap();
    let traced = Tokenizer::with_pattern(
        r"\w+",
        TokenizerOptions {
            trace_tokens: true,
            ..Default::default()
        },
    )
    .unwrap();
    let a = plain.tokenize("Some text here.", None).unwrap();
    let b = traced.tokenize("Some text here.", None).unwrap();
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn serializes_list() {
    let list = tokenize("Hi there", &words(), None, 0).unwrap();
    let yaml = serde_yaml::to_string(&list).unwrap();
    assert!(yaml.contains("count: 3"));
    assert!(yaml.contains("text: there"));
    assert!(yaml.contains("heat: []"));
}
