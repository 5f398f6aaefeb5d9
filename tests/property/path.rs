use fkref::path::{PathPattern, collect, collect_located, matches};
use fkref::primitives::values_equal;
use proptest::prelude::*;
use serde_json::{Value, json};

use super::common::{arb_json, arb_pattern};

/// Extract all key-only dot-paths from a JSON value (objects only).
fn extract_paths(value: &Value, prefix: &str, paths: &mut Vec<String>, max_depth: u32) {
    if max_depth == 0 {
        return;
    }
    if let Some(obj) = value.as_object() {
        for (key, child) in obj {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            paths.push(path.clone());
            extract_paths(child, &path, paths, max_depth - 1);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn root_pattern_matches_document(value in arb_json(3)) {
        prop_assert!(matches(&value, &PathPattern::parse(""), &value));
        prop_assert_eq!(collect(&PathPattern::parse(""), &value), vec![&value]);
    }

    #[test]
    fn nothing_matches_in_empty_mapping(value in arb_json(2), key in "[a-z]{1,4}") {
        let empty = json!({});
        prop_assert!(!matches(&value, &PathPattern::parse(&key), &empty));
    }

    #[test]
    fn key_paths_resolve_to_their_value(value in arb_json(3)) {
        let mut paths = Vec::new();
        extract_paths(&value, "", &mut paths, 4);
        for path in &paths {
            let found = collect(&PathPattern::parse(path), &value);
            prop_assert_eq!(found.len(), 1, "path {:?} on {:?}", path, value);
            prop_assert!(matches(found[0], &PathPattern::parse(path), &value));
        }
    }

    #[test]
    fn matches_agrees_with_collect(
        document in arb_json(3),
        raw in arb_pattern(),
        needle in arb_json(1),
    ) {
        let pattern = PathPattern::parse(&raw);
        let collected = collect(&pattern, &document);
        let expected = collected.iter().any(|v| values_equal(v, &needle));
        prop_assert_eq!(matches(&needle, &pattern, &document), expected);
        for v in &collected {
            prop_assert!(matches(v, &pattern, &document));
        }
    }

    #[test]
    fn located_collection_agrees_with_collect(document in arb_json(3), raw in arb_pattern()) {
        let pattern = PathPattern::parse(&raw);
        let plain = collect(&pattern, &document);
        let located: Vec<&Value> = collect_located(&pattern, &document)
            .into_iter()
            .map(|(_, v)| v)
            .collect();
        prop_assert_eq!(plain, located);
    }

    #[test]
    fn wildcard_on_array_returns_n_results(n in 1..8usize, elem in arb_json(1)) {
        let arr: Vec<Value> = (0..n).map(|_| elem.clone()).collect();
        let obj = json!({ "items": arr });
        let result = collect(&PathPattern::parse("items.[]"), &obj);
        prop_assert_eq!(result.len(), n);
    }

    #[test]
    fn string_and_number_never_match(n in -1000i64..1000) {
        let doc = json!({ "ids": [n.to_string()] });
        prop_assert!(!matches(&json!(n), &PathPattern::parse("ids.[]"), &doc));
        let doc = json!({ "ids": [n] });
        prop_assert!(!matches(&json!(n.to_string()), &PathPattern::parse("ids.[]"), &doc));
    }

    #[test]
    fn pattern_parse_never_panics(path in "\\PC{0,30}", value in arb_json(2)) {
        let pattern = PathPattern::parse(&path);
        let _ = collect(&pattern, &value);
        let _ = matches(&value, &pattern, &value);
    }

    #[test]
    fn display_reparses_to_same_pattern(raw in "\\PC{0,30}") {
        let pattern = PathPattern::parse(&raw);
        prop_assert_eq!(PathPattern::parse(&pattern.to_string()), pattern);
    }
}
