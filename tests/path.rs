use fkref::path::{PathPattern, Segment, collect, collect_located, matches};
use serde_json::{Value, json};

fn p(s: &str) -> PathPattern {
    PathPattern::parse(s)
}

fn cars() -> Value {
    json!({
        "makes": [
            {
                "id": "nissan",
                "alternateIds": ["datsun"],
                "models": [{ "id": "240z", "name": "Fairlady" }]
            },
            {
                "id": "toyota",
                "models": [
                    { "id": "kp60", "name": "starlet" },
                    { "id": "ae101", "name": "levin" }
                ]
            }
        ]
    })
}

// ─── Parsing ────────────────────────────────────────────────────────────────

#[test]
fn parse_splits_keys_and_wildcards() {
    let pattern = p("makes.[].models.[].id");
    assert_eq!(
        pattern.segments(),
        &[
            Segment::Key("makes".into()),
            Segment::Each,
            Segment::Key("models".into()),
            Segment::Each,
            Segment::Key("id".into()),
        ]
    );
    assert!(pattern.has_wildcard());
    assert_eq!(pattern.to_string(), "makes.[].models.[].id");
}

#[test]
fn separator_only_patterns_are_root() {
    for raw in ["", ".", "..", "..."] {
        assert!(p(raw).is_root(), "{:?} should parse to the root pattern", raw);
        assert_eq!(p(raw), PathPattern::root());
    }
}

#[test]
fn stray_separators_are_dropped() {
    assert_eq!(p(".a..b."), p("a.b"));
    assert_eq!(p(".a..b.").to_string(), "a.b");
}

#[test]
fn bracketed_keys_are_not_wildcards() {
    let pattern = p("items[].id");
    assert!(!pattern.has_wildcard());
    assert_eq!(pattern.segments()[0], Segment::Key("items[]".into()));
}

// ─── matches ────────────────────────────────────────────────────────────────

#[test]
fn root_pattern_matches_document_itself() {
    let doc = cars();
    assert!(matches(&doc, &p(""), &doc));
    assert!(matches(&json!("x"), &p(""), &json!("x")));
    assert!(!matches(&json!("y"), &p(""), &json!("x")));
}

#[test]
fn key_absent_is_no_match() {
    let empty = json!({});
    for v in [json!(null), json!("a"), json!(1), json!({}), json!([])] {
        assert!(!matches(&v, &p("a"), &empty));
    }
}

#[test]
fn key_on_scalar_is_no_match() {
    assert!(!matches(&json!(1), &p("a.b"), &json!({ "a": 1 })));
    assert!(!matches(&json!("x"), &p("a"), &json!("x")));
}

#[test]
fn wildcard_on_non_sequence_is_no_match() {
    let doc = json!({ "a": { "id": "x" } });
    assert!(!matches(&json!("x"), &p("a.[].id"), &doc));
}

#[test]
fn nested_wildcards_find_deep_value() {
    let doc = cars();
    let pattern = p("makes.[].models.[].id");
    assert!(matches(&json!("ae101"), &pattern, &doc));
    assert!(matches(&json!("240z"), &pattern, &doc));
    assert!(!matches(&json!("ae92"), &pattern, &doc));
}

#[test]
fn wildcard_as_final_segment_matches_elements() {
    let doc = cars();
    assert!(matches(&json!("datsun"), &p("makes.[].alternateIds.[]"), &doc));
    assert!(!matches(&json!("nissan"), &p("makes.[].alternateIds.[]"), &doc));
}

#[test]
fn no_type_coercion() {
    let doc = json!({ "ids": [1, "2", true] });
    let pattern = p("ids.[]");
    assert!(matches(&json!(1), &pattern, &doc));
    assert!(!matches(&json!("1"), &pattern, &doc));
    assert!(matches(&json!("2"), &pattern, &doc));
    assert!(!matches(&json!(2), &pattern, &doc));
    assert!(!matches(&json!(1), &p("ids.[]"), &json!({ "ids": [true] })));
}

#[test]
fn integer_and_float_forms_are_the_same_number() {
    let doc = json!({ "ids": [42.0] });
    assert!(matches(&json!(42), &p("ids.[]"), &doc));
}

// ─── collect ────────────────────────────────────────────────────────────────

#[test]
fn collect_root_returns_document() {
    let doc = cars();
    assert_eq!(collect(&p(""), &doc), vec![&doc]);
}

#[test]
fn collect_fans_out_over_arrays() {
    let doc = json!({ "items": [{ "id": "x" }, { "id": "y" }, { "other": "z" }] });
    let got: Vec<&Value> = collect(&p("items.[].id"), &doc);
    assert_eq!(got, vec![&json!("x"), &json!("y")]);
}

#[test]
fn collect_keeps_duplicates() {
    let doc = json!({ "items": [{ "id": "x" }, { "id": "x" }] });
    assert_eq!(collect(&p("items.[].id"), &doc).len(), 2);
}

#[test]
fn collect_can_return_composites() {
    let doc = cars();
    let got = collect(&p("makes.[].alternateIds"), &doc);
    assert_eq!(got, vec![&json!(["datsun"])]);
}

#[test]
fn collect_on_shape_mismatch_is_empty() {
    assert!(collect(&p("a.[]"), &json!({ "a": "str" })).is_empty());
    assert!(collect(&p("a.b"), &json!([1, 2])).is_empty());
    assert!(collect(&p("missing"), &json!({})).is_empty());
}

// ─── collect_located ────────────────────────────────────────────────────────

#[test]
fn located_collection_reports_concrete_paths() {
    let doc = cars();
    let got: Vec<(String, Value)> = collect_located(&p("makes.[].models.[].id"), &doc)
        .into_iter()
        .map(|(loc, v)| (loc.to_string(), v.clone()))
        .collect();
    assert_eq!(
        got,
        vec![
            ("makes[0].models[0].id".to_string(), json!("240z")),
            ("makes[1].models[0].id".to_string(), json!("kp60")),
            ("makes[1].models[1].id".to_string(), json!("ae101")),
        ]
    );
}

#[test]
fn located_root_is_dollar() {
    let doc = json!([1]);
    let got = collect_located(&p(""), &doc);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].0.to_string(), "$");

    let got = collect_located(&p("[]"), &doc);
    assert_eq!(got[0].0.to_string(), "[0]");
}

#[test]
fn pattern_round_trips_through_serde() {
    let pattern: PathPattern = serde_json::from_value(json!("a..[].b")).unwrap();
    assert_eq!(pattern, p("a.[].b"));
    assert_eq!(serde_json::to_value(&pattern).unwrap(), json!("a.[].b"));
}
