use flowlog_core::decode_nested;
use serde_json::json;

#[test]
fn decodes_json_encoded_string_into_structure() {
    let raw = json!("{\"query\": \"hi\", \"sys\": {\"user_id\": \"u1\"}}");
    let decoded = decode_nested(raw);
    assert_eq!(decoded["query"], "hi");
    assert_eq!(decoded["sys"]["user_id"], "u1");
}

#[test]
fn decodes_strings_nested_arbitrarily_deep() {
    let inner = json!({"answer": 42}).to_string();
    let middle = json!({"payload": inner}).to_string();
    let raw = json!({"outputs": middle});

    let decoded = decode_nested(raw);
    assert_eq!(decoded["outputs"]["payload"]["answer"], 42);
}

#[test]
fn leaves_plain_strings_untouched() {
    let raw = json!({"text": "not json at all", "date": "2024-01-01"});
    let decoded = decode_nested(raw.clone());
    assert_eq!(decoded, raw);
}

#[test]
fn recurses_into_arrays() {
    let raw = json!(["{\"a\": 1}", "plain", 7]);
    let decoded = decode_nested(raw);
    assert_eq!(decoded[0]["a"], 1);
    assert_eq!(decoded[1], "plain");
    assert_eq!(decoded[2], 7);
}

#[test]
fn is_idempotent_on_structured_values() {
    let raw = json!({"inputs": "{\"query\": \"hi\"}", "count": 3});
    let once = decode_nested(raw);
    let twice = decode_nested(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn non_string_scalars_pass_through() {
    assert_eq!(decode_nested(json!(null)), json!(null));
    assert_eq!(decode_nested(json!(true)), json!(true));
    assert_eq!(decode_nested(json!(1.5)), json!(1.5));
}
