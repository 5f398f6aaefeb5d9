#![no_main]

use fkref::cache::LookupCache;
use fkref::path::{PathPattern, collect, collect_located, matches};
use fkref::types::PatternSet;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // Use the first byte to determine the split point between pattern and JSON value.
    let split = data[0] as usize % data.len().max(1);
    let (path_bytes, value_bytes) = data.split_at(split.min(data.len()));

    let raw = String::from_utf8_lossy(path_bytes);

    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(value_bytes) {
        let pattern = PathPattern::parse(&raw);
        let collected = collect(&pattern, &value);
        assert_eq!(collected.len(), collect_located(&pattern, &value).len());
        for v in &collected {
            assert!(matches(v, &pattern, &value));
        }

        let set = PatternSet::from(pattern);
        let mut cache = LookupCache::new();
        let candidates = cache.resolve(&set, &value);
        for v in &collected {
            assert!(candidates.contains(v));
        }
    }
});
