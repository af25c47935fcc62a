//! Byte-level tokenization.
//!
//! Tokens are whitespace-delimited byte runs with leading and trailing ASCII
//! punctuation stripped, lowercased by the ASCII rule. Bytes at or above
//! 0x80 pass through unchanged, so any encoding survives the round trip.

use crate::Term;

/// The byte class chunks are split on: space, tab, CR, LF.
#[must_use]
pub const fn is_chunk_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

/// Calls `f` with each normalized token in `payload`, in order.
///
/// The slice passed to `f` is only valid for the duration of the call; it
/// lives in a scratch buffer reused between tokens.
pub fn for_each_token(payload: &[u8], mut f: impl FnMut(&[u8])) {
    let mut scratch = Vec::new();

    for raw in payload.split(|&byte| is_chunk_whitespace(byte)) {
        let token = trim_punctuation(raw);
        if token.is_empty() {
            continue;
        }

        scratch.clear();
        scratch.extend(token.iter().map(|byte| byte.to_ascii_lowercase()));
        f(&scratch);
    }
}

/// Collects the normalized tokens of `payload` into owned terms.
#[must_use]
pub fn tokens(payload: &[u8]) -> Vec<Term> {
    let mut out = Vec::new();
    for_each_token(payload, |token| out.push(Term::from(token)));
    out
}

/// Strips leading and trailing ASCII punctuation.
fn trim_punctuation(raw: &[u8]) -> &[u8] {
    let Some(start) = raw.iter().position(|byte| !byte.is_ascii_punctuation()) else {
        return &[];
    };
    let end = raw
        .iter()
        .rposition(|byte| !byte.is_ascii_punctuation())
        .map_or(start, |last| last + 1);

    &raw[start..end]
}
