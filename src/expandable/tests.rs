//! Unit tests for expandable module.

use super::*;
use serde_json::json;

fn map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected a JSON object"),
    }
}

#[test]
fn test_extract_selects_true_flags_in_order() {
    let data = map(json!({
        "expandStageHistory": true,
        "apiKey": "k",
        "expandConstraints": false,
        "expandItems": true
    }));

    let selected = extract(&data);
    let names: Vec<_> = selected.iter().map(|e| e.name.as_str()).collect();

    assert_eq!(names, vec!["StageHistory", "Items"]);
    assert_eq!(selected[0].key, "expandStageHistory");
}

#[test]
fn test_extract_ignores_bare_prefix_and_non_bool() {
    let data = map(json!({ "expand": true, "expandItems": "true" }));

    assert!(extract(&data).is_empty());
}

#[test]
fn test_take_parameters_indexes_and_removes_sources() {
    let mut data = map(json!({
        "expandItems": true,
        "filter": "All",
        "expandStageHistory": true,
        "expandConstraints": false
    }));

    let params = take_parameters(&mut data);

    assert_eq!(
        params,
        vec![
            ("expand[0]".to_string(), "Items".to_string()),
            ("expand[1]".to_string(), "StageHistory".to_string()),
        ]
    );
    assert_eq!(data.len(), 1);
    assert!(data.contains_key("filter"));
}

#[test]
fn test_take_parameters_is_repeatable() {
    let source = json!({ "expandItems": true, "expandStageHistory": true });

    let first = take_parameters(&mut map(source.clone()));
    let second = take_parameters(&mut map(source));

    assert_eq!(first, second);
}

#[test]
fn test_empty_map() {
    let mut data = Map::new();

    assert!(take_parameters(&mut data).is_empty());
}
