use serde_json::Value;
use std::borrow::Cow;

use crate::cache::LookupCache;

/// State of one validation run: the lookup document and its cache.
///
/// Create one per run and pass it by `&mut` to every check of that run. The
/// document is only ever read. Dropping the context discards the cache.
#[derive(Debug)]
pub struct ValidationContext<'a> {
    data: Cow<'a, Value>,
    cache: LookupCache,
}

impl ValidationContext<'static> {
    /// Context owning its lookup document.
    pub fn new(data: Value) -> Self {
        ValidationContext {
            data: Cow::Owned(data),
            cache: LookupCache::new(),
        }
    }
}

impl<'a> ValidationContext<'a> {
    /// Context borrowing a document that outlives the run.
    pub fn borrowed(data: &'a Value) -> Self {
        ValidationContext {
            data: Cow::Borrowed(data),
            cache: LookupCache::new(),
        }
    }

    /// The document foreign keys are looked up in.
    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn cache(&self) -> &LookupCache {
        &self.cache
    }

    /// Splits the context into the document and its cache so both can be
    /// used at once.
    pub fn parts_mut(&mut self) -> (&Value, &mut LookupCache) {
        (&*self.data, &mut self.cache)
    }
}
