//! The index map: terms to postings.

use hashbrown::{HashMap, hash_map};

use crate::{SourceId, Term};

use super::Posting;

/// Map from term to posting with non-deterministic iteration order.
///
/// One shape serves every stage: workers build small local maps, the
/// aggregator guards a large global one, and the merger folds partition
/// files back into maps of this type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexMap<P> {
    inner: HashMap<Term, P>,
}

impl<P> Default for IndexMap<P> {
    fn default() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }
}

impl<P: Posting> IndexMap<P> {
    /// Creates a new empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new map with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: HashMap::with_capacity(capacity),
        }
    }

    /// Number of distinct terms resident in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the map holds no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Records one occurrence of `token` attributed to `source`.
    ///
    /// The token is only copied into an owned term when it is new; repeat
    /// occurrences update the existing posting in place.
    #[inline]
    pub fn record(&mut self, token: &[u8], source: &SourceId) {
        match self.inner.entry_ref(token) {
            hash_map::EntryRef::Vacant(entry) => {
                entry.insert(P::occurrence(source));
            }
            hash_map::EntryRef::Occupied(mut entry) => entry.get_mut().record(source),
        }
    }

    /// Inserts a parsed record, merging with any posting already present.
    pub fn insert_merge(&mut self, term: Term, posting: P) {
        match self.inner.entry(term) {
            hash_map::Entry::Vacant(entry) => {
                entry.insert(posting);
            }
            hash_map::Entry::Occupied(mut entry) => entry.get_mut().merge(posting),
        }
    }

    /// Folds every entry of `other` into this map.
    pub fn absorb(&mut self, other: Self) {
        self.inner.reserve(other.len());
        for (term, posting) in other.inner {
            self.insert_merge(term, posting);
        }
    }

    /// Iterates over entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&Term, &P)> {
        self.inner.iter()
    }

    /// Consumes the map into an unordered entry list.
    #[must_use]
    pub fn into_entries(self) -> Vec<(Term, P)> {
        self.inner.into_iter().collect()
    }
}

impl<P: Posting> IntoIterator for IndexMap<P> {
    type Item = (Term, P);
    type IntoIter = hash_map::IntoIter<Term, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<P: Posting> FromIterator<(Term, P)> for IndexMap<P> {
    fn from_iter<I: IntoIterator<Item = (Term, P)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (size_hint, _) = iter.size_hint();
        let mut map = Self::with_capacity(size_hint);
        for (term, posting) in iter {
            map.insert_merge(term, posting);
        }
        map
    }
}
