//! Posting values: what an index stores per term.

use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::{Count, SourceId, Term};

/// The value an index keeps per term, and how it serializes into the
/// line-oriented partition format.
///
/// A record line is `<token>` followed by the posting's space-separated
/// fields. Implementations parse and print only the fields; the map layer
/// owns the token itself.
pub trait Posting: Sized + Send + 'static {
    /// A posting recording a single occurrence attributed to `source`.
    fn occurrence(source: &SourceId) -> Self;

    /// Records one more occurrence attributed to `source`.
    fn record(&mut self, source: &SourceId);

    /// Folds another posting for the same term into this one.
    fn merge(&mut self, other: Self);

    /// Appends this posting's fields (with leading separators) to a record
    /// line being assembled.
    fn write_fields(&self, line: &mut Vec<u8>);

    /// Parses the fields of a record line.
    ///
    /// # Errors
    ///
    /// Returns a message describing the malformed field on failure.
    fn parse_fields<'a>(fields: impl Iterator<Item = &'a [u8]>) -> Result<Self, String>;

    /// Orders entries for the final output file.
    fn order_output(entries: &mut [(Term, Self)]);
}

/// Word-frequency posting: an occurrence count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TermCount(pub Count);

impl Posting for TermCount {
    fn occurrence(_source: &SourceId) -> Self {
        Self(1)
    }

    fn record(&mut self, _source: &SourceId) {
        self.0 += 1;
    }

    fn merge(&mut self, other: Self) {
        self.0 += other.0;
    }

    fn write_fields(&self, line: &mut Vec<u8>) {
        line.push(b' ');
        line.extend_from_slice(self.0.to_string().as_bytes());
    }

    fn parse_fields<'a>(mut fields: impl Iterator<Item = &'a [u8]>) -> Result<Self, String> {
        let field = fields.next().ok_or("record is missing its count")?;
        if fields.next().is_some() {
            return Err("record has more than one count field".to_string());
        }

        std::str::from_utf8(field)
            .ok()
            .and_then(|digits| digits.parse::<Count>().ok())
            .map(Self)
            .ok_or_else(|| format!("invalid decimal count: {}", String::from_utf8_lossy(field)))
    }

    /// Count descending; ties broken by token bytes ascending so repeated
    /// runs produce identical output.
    fn order_output(entries: &mut [(Term, Self)]) {
        entries.par_sort_unstable_by(|(term_a, count_a), (term_b, count_b)| {
            count_b.0.cmp(&count_a.0).then_with(|| term_a.cmp(term_b))
        });
    }
}

/// Inverted-index posting: the set of documents a term occurs in.
///
/// `BTreeSet` keeps source ids deduplicated and ordered, so a record's
/// fields are stable across runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocSet(pub BTreeSet<SourceId>);

impl Posting for DocSet {
    fn occurrence(source: &SourceId) -> Self {
        let mut docs = BTreeSet::new();
        docs.insert(SourceId::clone(source));
        Self(docs)
    }

    fn record(&mut self, source: &SourceId) {
        if !self.0.contains(&**source) {
            self.0.insert(SourceId::clone(source));
        }
    }

    fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    fn write_fields(&self, line: &mut Vec<u8>) {
        for doc in &self.0 {
            line.push(b' ');
            line.extend_from_slice(doc.as_bytes());
        }
    }

    fn parse_fields<'a>(fields: impl Iterator<Item = &'a [u8]>) -> Result<Self, String> {
        let mut docs = BTreeSet::new();
        for field in fields {
            let doc = std::str::from_utf8(field)
                .map_err(|_| "source id is not valid UTF-8".to_string())?;
            docs.insert(SourceId::from(doc));
        }

        if docs.is_empty() {
            return Err("record has no source ids".to_string());
        }

        Ok(Self(docs))
    }

    /// Token bytes ascending; source ids within a line are already ordered.
    fn order_output(entries: &mut [(Term, Self)]) {
        entries.par_sort_unstable_by(|(term_a, _), (term_b, _)| term_a.cmp(term_b));
    }
}
