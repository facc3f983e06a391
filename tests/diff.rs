use json_patch::{apply, diff, from_value, PatchOperation};
use serde_json::json;

// S4: array rotation collapses to a single `move`.
#[test]
fn scenario_rotation_is_one_move() {
    let src = json!({"foo": [1, 2, 3]});
    let dst = json!({"foo": [3, 1, 2]});
    let patch = diff(&src, &dst);
    assert_eq!(patch.len(), 1);
    assert!(matches!(patch.iter().next().unwrap(), PatchOperation::Move(_)));
    assert_eq!(apply(&src, &patch).unwrap(), dst);
}

// S5: a single scalar mismatch collapses to a single `replace`.
#[test]
fn scenario_single_mismatch_is_one_replace() {
    let src = json!({"foo": [1, 2, 3]});
    let dst = json!({"foo": [3, 2, 3]});
    let patch = diff(&src, &dst);
    assert_eq!(patch.len(), 1);
    match patch.iter().next().unwrap() {
        PatchOperation::Replace(op) => {
            assert_eq!(op.path.to_string(), "/foo/0");
            assert_eq!(op.value, json!(3));
        }
        other => panic!("expected replace, got {other:?}"),
    }
    assert_eq!(apply(&src, &patch).unwrap(), dst);
}

// S6: object keys containing '/' round-trip through pointer escaping.
#[test]
fn scenario_escaped_key() {
    let src = json!({"x/y": 1});
    let dst = json!({"x/y": 2});
    let patch = diff(&src, &dst);
    assert_eq!(
        patch.to_string(),
        r#"[{"op":"replace","path":"/x~1y","value":2}]"#
    );
    assert_eq!(apply(&src, &patch).unwrap(), dst);
}

// P1: round-trip property, spot-checked over a handful of structural shapes.
#[test]
fn round_trip_equal_values_yield_no_ops() {
    let doc = json!({"a": [1, {"b": 2}], "c": "same"});
    let patch = diff(&doc, &doc);
    assert!(patch.is_empty());
    assert_eq!(apply(&doc, &patch).unwrap(), doc);
}

#[test]
fn round_trip_object_add_remove_replace() {
    let src = json!({"keep": 1, "drop": 2, "change": "old"});
    let dst = json!({"keep": 1, "change": "new", "fresh": true});
    let patch = diff(&src, &dst);
    assert_eq!(apply(&src, &patch).unwrap(), dst);
}

#[test]
fn round_trip_nested_object_in_array() {
    let src = json!({"items": [{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]});
    let dst = json!({"items": [{"id": 1, "name": "a!"}, {"id": 2, "name": "b"}]});
    let patch = diff(&src, &dst);
    // Same-position object mismatch recurses rather than replacing wholesale.
    assert_eq!(patch.len(), 1);
    match patch.iter().next().unwrap() {
        PatchOperation::Replace(op) => assert_eq!(op.path.to_string(), "/items/0/name"),
        other => panic!("expected a targeted replace, got {other:?}"),
    }
    assert_eq!(apply(&src, &patch).unwrap(), dst);
}

#[test]
fn round_trip_array_growth_and_shrink() {
    let src = json!([1, 2, 3, 4]);
    let dst = json!([1, 2]);
    let patch = diff(&src, &dst);
    assert_eq!(apply(&src, &patch).unwrap(), dst);

    let src = json!([1, 2]);
    let dst = json!([1, 2, 3, 4]);
    let patch = diff(&src, &dst);
    assert_eq!(apply(&src, &patch).unwrap(), dst);
}

#[test]
fn round_trip_array_of_arrays_mutation() {
    let src = json!([[1, 2], [3, 4]]);
    let dst = json!([[1, 2], [3, 5]]);
    let patch = diff(&src, &dst);
    assert_eq!(apply(&src, &patch).unwrap(), dst);
}

#[test]
fn round_trip_scalar_to_container_replace() {
    let src = json!({"x": 1});
    let dst = json!({"x": [1, 2, 3]});
    let patch = diff(&src, &dst);
    assert_eq!(patch.len(), 1);
    assert!(matches!(patch.iter().next().unwrap(), PatchOperation::Replace(_)));
    assert_eq!(apply(&src, &patch).unwrap(), dst);
}

// P7: whenever the coalescer emits a move, re-applying it is equivalent to
// the pre-coalesce remove+add pair it replaced.
#[test]
fn move_equivalent_to_remove_add_pair() {
    let src = json!(["a", "b", "c"]);
    let dst = json!(["b", "c", "a"]);
    let patch = diff(&src, &dst);
    assert!(patch.iter().any(|op| matches!(op, PatchOperation::Move(_))));
    assert_eq!(apply(&src, &patch).unwrap(), dst);

    // The equivalent, never-coalesced form is always correct too.
    let raw = from_value(json!([
        {"op": "remove", "path": "/0"},
        {"op": "add", "path": "/2", "value": "a"}
    ]))
    .unwrap();
    assert_eq!(apply(&src, &raw).unwrap(), dst);
}
