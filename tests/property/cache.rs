use fkref::cache::{CandidateSet, LookupCache};
use fkref::path::{PathPattern, collect, matches};
use fkref::primitives::values_equal;
use fkref::types::PatternSet;
use proptest::prelude::*;
use serde_json::Value;

use super::common::{arb_json, arb_pattern, leaves};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // Hash membership must agree with a linear scan under values_equal.
    #[test]
    fn candidate_membership_matches_linear_scan(
        values in prop::collection::vec(arb_json(2), 0..12),
        needle in arb_json(2),
    ) {
        let set: CandidateSet = values.iter().cloned().collect();
        let expected = values.iter().any(|v| values_equal(v, &needle));
        prop_assert_eq!(set.contains(&needle), expected);
        prop_assert_eq!(set.len(), values.len());
    }

    #[test]
    fn every_leaf_is_a_member_of_its_own_set(document in arb_json(3)) {
        let mut all = Vec::new();
        leaves(&document, &mut all);
        let set: CandidateSet = all.iter().cloned().collect();
        for leaf in &all {
            prop_assert!(set.contains(leaf));
        }
    }

    #[test]
    fn resolve_is_union_of_collect(
        document in arb_json(3),
        raws in prop::collection::vec(arb_pattern(), 1..4),
        needle in arb_json(1),
    ) {
        let patterns: Vec<PathPattern> = raws.iter().map(|r| PathPattern::parse(r)).collect();
        let set = PatternSet::new(patterns.clone()).unwrap();
        let mut cache = LookupCache::new();

        let expected: Vec<Value> = patterns
            .iter()
            .flat_map(|p| collect(p, &document))
            .cloned()
            .collect();
        prop_assert_eq!(cache.resolve(&set, &document).values(), expected.as_slice());

        let via_matches = patterns.iter().any(|p| matches(&needle, p, &document));
        prop_assert_eq!(cache.resolve(&set, &document).contains(&needle), via_matches);
        prop_assert_eq!(cache.traversals(), 1);
    }
}
