//! Tests for the index map and posting values.

use corpus_index::{DocSet, IndexMap, Posting, SourceId, TermCount};

fn doc(name: &str) -> SourceId {
    SourceId::from(name)
}

#[test]
fn record_counts_repeat_occurrences() {
    let source = doc("doc_0");
    let mut map: IndexMap<TermCount> = IndexMap::new();
    map.record(b"word", &source);
    map.record(b"word", &source);
    map.record(b"other", &source);

    assert_eq!(map.len(), 2);
    let entries = map.into_entries();
    let word = entries
        .iter()
        .find(|(term, _)| &**term == b"word")
        .expect("word entry");
    assert_eq!(word.1, TermCount(2));
}

#[test]
fn record_collects_distinct_sources() {
    let mut map: IndexMap<DocSet> = IndexMap::new();
    map.record(b"word", &doc("a_chunk_0"));
    map.record(b"word", &doc("a_chunk_0"));
    map.record(b"word", &doc("b_chunk_0"));

    let entries = map.into_entries();
    assert_eq!(entries.len(), 1);
    let docs: Vec<&str> = entries[0].1.0.iter().map(|id| id.as_ref()).collect();
    assert_eq!(docs, vec!["a_chunk_0", "b_chunk_0"]);
}

#[test]
fn absorb_adds_counts() {
    let source = doc("doc_0");
    let mut left: IndexMap<TermCount> = IndexMap::new();
    left.record(b"shared", &source);
    left.record(b"only-left", &source);

    let mut right: IndexMap<TermCount> = IndexMap::new();
    right.record(b"shared", &source);

    left.absorb(right);
    assert_eq!(left.len(), 2);
    let entries = left.into_entries();
    let shared = entries
        .iter()
        .find(|(term, _)| &**term == b"shared")
        .expect("shared entry");
    assert_eq!(shared.1, TermCount(2));
}

#[test]
fn absorb_unions_doc_sets() {
    let mut left: IndexMap<DocSet> = IndexMap::new();
    left.record(b"shared", &doc("a_chunk_0"));

    let mut right: IndexMap<DocSet> = IndexMap::new();
    right.record(b"shared", &doc("b_chunk_0"));

    left.absorb(right);
    let entries = left.into_entries();
    assert_eq!(entries[0].1.0.len(), 2);
}

#[test]
fn term_count_round_trips_through_fields() {
    let mut line = Vec::new();
    TermCount(42).write_fields(&mut line);
    assert_eq!(line, b" 42");

    let parsed = TermCount::parse_fields([b"42".as_slice()].into_iter()).expect("valid count");
    assert_eq!(parsed, TermCount(42));
}

#[test]
fn term_count_rejects_malformed_fields() {
    assert!(TermCount::parse_fields(std::iter::empty()).is_err());
    assert!(TermCount::parse_fields([b"nope".as_slice()].into_iter()).is_err());
    assert!(TermCount::parse_fields([b"1".as_slice(), b"2".as_slice()].into_iter()).is_err());
}

#[test]
fn doc_set_round_trips_through_fields() {
    let mut set = DocSet::occurrence(&doc("b_chunk_1"));
    set.record(&doc("a_chunk_0"));

    let mut line = Vec::new();
    set.write_fields(&mut line);
    assert_eq!(line, b" a_chunk_0 b_chunk_1");

    let parsed = DocSet::parse_fields([b"a_chunk_0".as_slice(), b"b_chunk_1".as_slice()].into_iter())
        .expect("valid doc set");
    assert_eq!(parsed, set);
}

#[test]
fn doc_set_rejects_empty_records() {
    assert!(DocSet::parse_fields(std::iter::empty()).is_err());
}

#[test]
fn tally_output_orders_by_count_then_token() {
    let mut entries = vec![
        (b"zebra".to_vec().into_boxed_slice(), TermCount(2)),
        (b"apple".to_vec().into_boxed_slice(), TermCount(2)),
        (b"most".to_vec().into_boxed_slice(), TermCount(9)),
        (b"least".to_vec().into_boxed_slice(), TermCount(1)),
    ];
    TermCount::order_output(&mut entries);

    let terms: Vec<&[u8]> = entries.iter().map(|(term, _)| &**term).collect();
    assert_eq!(
        terms,
        vec![
            b"most".as_slice(),
            b"apple".as_slice(),
            b"zebra".as_slice(),
            b"least".as_slice()
        ]
    );
}

#[test]
fn invert_output_orders_by_token() {
    let mut entries = vec![
        (b"zebra".to_vec().into_boxed_slice(), DocSet::occurrence(&doc("d"))),
        (b"apple".to_vec().into_boxed_slice(), DocSet::occurrence(&doc("d"))),
    ];
    DocSet::order_output(&mut entries);

    assert_eq!(&*entries[0].0, b"apple".as_slice());
    assert_eq!(&*entries[1].0, b"zebra".as_slice());
}
