#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte picks the split between rule-set text and document text.
    let split = data[0] as usize % data.len();
    let (rule_bytes, doc_bytes) = data[1..].split_at(split.min(data.len() - 1));

    let Ok(rules) = fkref::parse_rules(&String::from_utf8_lossy(rule_bytes)) else {
        return;
    };
    let _ = fkref::lint(&rules);

    if let Ok(document) = fkref::parse_document(&String::from_utf8_lossy(doc_bytes)) {
        let result = fkref::validate_self(&document, &rules);
        assert!(!result.is_misconfigured());
        let _ = fkref::serialize_report(&result);
    }
});
