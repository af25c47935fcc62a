//! Tests for byte-level tokenization.

use corpus_index::index::{for_each_token, is_chunk_whitespace, tokens};

fn collect(payload: &[u8]) -> Vec<Vec<u8>> {
    tokens(payload).into_iter().map(Vec::from).collect()
}

#[test]
fn splits_on_whitespace_and_lowercases() {
    assert_eq!(
        collect(b"Hola, mundo! hola MUNDO."),
        vec![
            b"hola".to_vec(),
            b"mundo".to_vec(),
            b"hola".to_vec(),
            b"mundo".to_vec()
        ]
    );
}

#[test]
fn strips_leading_and_trailing_punctuation() {
    assert_eq!(collect(b"--wrapped--"), vec![b"wrapped".to_vec()]);
    assert_eq!(collect(b"(parens)"), vec![b"parens".to_vec()]);
}

#[test]
fn keeps_inner_punctuation() {
    assert_eq!(collect(b"can't"), vec![b"can't".to_vec()]);
    assert_eq!(collect(b"foo-bar"), vec![b"foo-bar".to_vec()]);
}

#[test]
fn discards_punctuation_only_tokens() {
    assert!(collect(b"--- ... !!!").is_empty());
}

#[test]
fn discards_empty_runs_between_separators() {
    assert_eq!(
        collect(b"  a\t\tb\r\nc  "),
        vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]
    );
}

#[test]
fn passes_high_bytes_through_unchanged() {
    // "café!" in UTF-8; only the ASCII '!' is trimmed.
    assert_eq!(collect(b"caf\xc3\xa9!"), vec![b"caf\xc3\xa9".to_vec()]);
}

#[test]
fn uppercase_ascii_only_is_lowercased() {
    // 0xC3 is not in 'A'..'Z' and must not be touched by the ASCII rule.
    assert_eq!(collect(b"\xc3\x89CRAN"), vec![b"\xc3\x89cran".to_vec()]);
}

#[test]
fn chunk_whitespace_is_exactly_four_bytes() {
    assert!(is_chunk_whitespace(b' '));
    assert!(is_chunk_whitespace(b'\t'));
    assert!(is_chunk_whitespace(b'\r'));
    assert!(is_chunk_whitespace(b'\n'));
    assert!(!is_chunk_whitespace(0x0B));
    assert!(!is_chunk_whitespace(0x0C));
    assert!(!is_chunk_whitespace(b'a'));
}

#[test]
fn vertical_tab_does_not_split_tokens() {
    assert_eq!(collect(b"a\x0Bb"), vec![b"a\x0bb".to_vec()]);
}

#[test]
fn empty_payload_yields_no_tokens() {
    assert!(collect(b"").is_empty());
}

#[test]
fn for_each_token_visits_in_order() {
    let mut seen = Vec::new();
    for_each_token(b"one two three", |token| seen.push(token.to_vec()));
    assert_eq!(seen, vec![b"one".to_vec(), b"two".to_vec(), b"three".to_vec()]);
}
