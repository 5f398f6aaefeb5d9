//! Per-run cache of candidate values, keyed by pattern set.
//!
//! Checking every row of a child array against the same parent key path
//! would otherwise re-walk the document once per row. [`LookupCache`] walks
//! it once per distinct [`PatternSet`] and answers the remaining checks with
//! a hash lookup.
//!
//! A cache is bound to one document for its whole life. It is created with
//! the run's [`ValidationContext`](crate::context::ValidationContext) and
//! dropped with it; entries are never invalidated in between.

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, trace};

use crate::path::collect;
use crate::primitives::{ScalarKey, values_equal};
use crate::types::PatternSet;

// ─── CacheKey ───────────────────────────────────────────────────────────────

/// Normalized identity of a pattern set.
///
/// Built from parsed segments rather than a joined string, so no separator
/// character can make two different sets collide. `"a.b"` and `".a..b."`
/// share a key; `["a", "b"]` and `["b", "a"]` do not.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey(PatternSet);

impl CacheKey {
    pub fn of(set: &PatternSet) -> Self {
        CacheKey(set.clone())
    }

    pub fn pattern_set(&self) -> &PatternSet {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── CandidateSet ───────────────────────────────────────────────────────────

/// Every value reachable through a pattern set, in traversal order.
///
/// Duplicates are kept in [`values`](CandidateSet::values). Membership of
/// scalars is a hash lookup; arrays and objects fall back to a linear scan
/// over the composite values only.
#[derive(Clone, Debug, Default)]
pub struct CandidateSet {
    values: Vec<Value>,
    scalars: HashSet<ScalarKey>,
    composites: Vec<usize>,
}

impl CandidateSet {
    pub fn new() -> Self {
        CandidateSet::default()
    }

    pub fn push(&mut self, value: Value) {
        match ScalarKey::of(&value) {
            Some(key) => {
                self.scalars.insert(key);
            }
            None => self.composites.push(self.values.len()),
        }
        self.values.push(value);
    }

    /// Membership under strict equality: `1` is not `"1"`.
    pub fn contains(&self, value: &Value) -> bool {
        match ScalarKey::of(value) {
            Some(key) => self.scalars.contains(&key),
            None => self
                .composites
                .iter()
                .any(|&i| values_equal(&self.values[i], value)),
        }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<Value> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut set = CandidateSet::new();
        for value in iter {
            set.push(value);
        }
        set
    }
}

/// Collects the union of every pattern in `set`, in declaration order.
fn build_candidates(set: &PatternSet, document: &Value) -> CandidateSet {
    set.patterns()
        .iter()
        .flat_map(|pattern| collect(pattern, document))
        .cloned()
        .collect()
}

// ─── LookupCache ────────────────────────────────────────────────────────────

/// Single-threaded run-scoped store.
#[derive(Debug, Default)]
pub struct LookupCache {
    entries: HashMap<CacheKey, CandidateSet>,
    traversals: usize,
}

impl LookupCache {
    pub fn new() -> Self {
        LookupCache::default()
    }

    /// Returns the candidate set for `set`, walking `document` only if no
    /// entry exists yet.
    pub fn resolve(&mut self, set: &PatternSet, document: &Value) -> &CandidateSet {
        let key = CacheKey::of(set);
        if self.entries.contains_key(&key) {
            trace!(key = %key, "fk cache hit");
        } else {
            let candidates = build_candidates(set, document);
            self.traversals += 1;
            debug!(key = %key, values = candidates.len(), "fk cache entry built");
            self.entries.insert(key.clone(), candidates);
        }
        &self.entries[&key]
    }

    pub fn get(&self, set: &PatternSet) -> Option<&CandidateSet> {
        self.entries.get(&CacheKey::of(set))
    }

    /// Number of full document walks performed so far.
    pub fn traversals(&self) -> usize {
        self.traversals
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─── SharedLookupCache ──────────────────────────────────────────────────────

/// Run-scoped store for hosts that check fields from several threads.
///
/// The lock is held across "check, then populate", so concurrent callers
/// asking for the same missing key wait for one walk instead of racing.
#[derive(Debug, Default)]
pub struct SharedLookupCache {
    entries: Mutex<HashMap<CacheKey, Arc<CandidateSet>>>,
    traversals: AtomicUsize,
}

impl SharedLookupCache {
    pub fn new() -> Self {
        SharedLookupCache::default()
    }

    pub fn resolve(&self, set: &PatternSet, document: &Value) -> Arc<CandidateSet> {
        let key = CacheKey::of(set);
        let mut entries = self.entries.lock();
        if let Some(existing) = entries.get(&key) {
            trace!(key = %key, "fk cache hit");
            return Arc::clone(existing);
        }
        let candidates = Arc::new(build_candidates(set, document));
        self.traversals.fetch_add(1, Ordering::Relaxed);
        debug!(key = %key, values = candidates.len(), "fk cache entry built");
        entries.insert(key, Arc::clone(&candidates));
        candidates
    }

    pub fn traversals(&self) -> usize {
        self.traversals.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
