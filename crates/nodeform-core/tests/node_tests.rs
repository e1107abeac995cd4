//! Contract tests for the Node tree container: key validation, path-based
//! read/write, conflict detection and array inference.

use nodeform_core::{ModelError, Node, NodeValue};

// ============================================================================
// Keyed adds
// ============================================================================

#[test]
fn add_node_returns_populatable_child() {
    let mut model = Node::new();
    let child = model.add_node("log").unwrap();
    child.add_value("level", "info").unwrap();

    assert_eq!(model.read("log.level", String::new()).unwrap(), "info");
}

#[test]
fn add_node_rejects_empty_and_whitespace_keys() {
    let mut model = Node::new();
    assert!(matches!(model.add_node(""), Err(ModelError::InvalidKey(_))));
    assert!(matches!(model.add_node("   "), Err(ModelError::InvalidKey(_))));
}

#[test]
fn add_node_rejects_duplicate_key_case_insensitively() {
    let mut model = Node::new();
    model.add_node("Log").unwrap();

    assert!(matches!(model.add_node("log"), Err(ModelError::InvalidKey(_))));
}

#[test]
fn add_value_rejects_nested_node() {
    let mut model = Node::new();
    let result = model.add_value("child", Node::new());

    assert!(matches!(result, Err(ModelError::InvalidScalarType(_))));
}

#[test]
fn add_values_builds_index_keyed_child() {
    let mut model = Node::new();
    model.add_values("items", vec!["a", "b", "c"]).unwrap();

    let items = model.read_node("items").unwrap().unwrap();
    assert_eq!(items.keys().collect::<Vec<_>>(), vec!["0", "1", "2"]);
    assert_eq!(items.get_value("1", String::new()).unwrap(), "b");
}

#[test]
fn add_values_rejects_duplicate_key_before_inserting() {
    let mut model = Node::new();
    model.add_value("items", 1).unwrap();

    let result = model.add_values("items", vec![2, 3]);
    assert!(matches!(result, Err(ModelError::InvalidKey(_))));
}

// ============================================================================
// Path-based read and write
// ============================================================================

#[test]
fn write_then_read_roundtrips_scalars() {
    let mut model = Node::new();
    model
        .write("text", "hello")
        .unwrap()
        .write("flag", true)
        .unwrap()
        .write("count", 42)
        .unwrap()
        .write("ratio", 2.5f64)
        .unwrap()
        .write("letter", 'x')
        .unwrap();

    assert_eq!(model.read("text", String::new()).unwrap(), "hello");
    assert!(model.read("flag", false).unwrap());
    assert_eq!(model.read("count", 0).unwrap(), 42);
    assert_eq!(model.read("ratio", 0.0f64).unwrap(), 2.5);
    assert_eq!(model.read("letter", ' ').unwrap(), 'x');
}

#[test]
fn write_creates_intermediate_nodes() {
    let mut model = Node::new();
    model.write("a.b.c", 1).unwrap();

    assert!(model.read_node("a.b").unwrap().is_some());
    assert_eq!(model.read("a.b.c", 0).unwrap(), 1);
}

#[test]
fn read_returns_default_for_missing_path_without_creating_nodes() {
    let model = Node::new();
    assert_eq!(model.read("a.b.c", 7).unwrap(), 7);

    // The read walk is strictly read-only.
    assert!(model.is_empty());
}

#[test]
fn read_of_wrong_kind_is_type_mismatch() {
    let mut model = Node::new();
    model.write("count", 42).unwrap();

    let result = model.read("count", String::new());
    assert!(matches!(result, Err(ModelError::TypeMismatch { .. })));
}

#[test]
fn read_accepts_null_through_option() {
    let mut model = Node::new();
    model.write("absent", NodeValue::Null).unwrap();

    let value: Option<String> = model.read("absent", None).unwrap();
    assert_eq!(value, None);
}

#[test]
fn write_through_scalar_is_path_conflict_naming_the_prefix() {
    let mut model = Node::new();
    model.write("a.b", 1).unwrap();

    let err = model.write("a.b.c", 2).unwrap_err();
    assert!(matches!(err, ModelError::PathConflict { .. }));
    assert!(err.to_string().contains("a.b"));
    assert!(!err.to_string().contains("a.b.c"));
}

#[test]
fn read_through_scalar_is_path_conflict() {
    let mut model = Node::new();
    model.write("a.b", 1).unwrap();

    let result = model.read("a.b.c", 0);
    assert!(matches!(result, Err(ModelError::PathConflict { .. })));
}

#[test]
fn write_overwrites_terminal_value_wholesale() {
    let mut model = Node::new();
    model.write("key", 1).unwrap();
    model.write("key", "replaced").unwrap();

    assert_eq!(model.read("key", String::new()).unwrap(), "replaced");
}

#[test]
fn invalid_paths_are_rejected_before_mutation() {
    let mut model = Node::new();

    assert!(matches!(model.write("", 1), Err(ModelError::InvalidPath(_))));
    assert!(matches!(model.write("a..b", 1), Err(ModelError::InvalidPath(_))));
    assert!(matches!(model.write("a b", 1), Err(ModelError::InvalidPath(_))));
    assert!(model.is_empty());
}

#[test]
fn paths_may_start_with_digits_and_underscores() {
    let mut model = Node::new();
    model.write("0.value", 1).unwrap();
    model.write("_hidden", 2).unwrap();

    assert_eq!(model.read("0.value", 0).unwrap(), 1);
    assert_eq!(model.read("_hidden", 0).unwrap(), 2);
}

// ============================================================================
// read_node / write_node
// ============================================================================

#[test]
fn write_node_creates_every_segment() {
    let mut model = Node::new();
    model.write_node("a.b.c").unwrap();

    assert!(model.read_node("a.b.c").unwrap().is_some());
}

#[test]
fn read_node_returns_none_for_missing_path() {
    let model = Node::new();
    assert!(model.read_node("a.b").unwrap().is_none());
}

#[test]
fn node_resolution_conflicts_on_terminal_scalar() {
    let mut model = Node::new();
    model.write("a.b", 1).unwrap();

    assert!(matches!(model.read_node("a.b"), Err(ModelError::PathConflict { .. })));
    assert!(matches!(model.write_node("a.b"), Err(ModelError::PathConflict { .. })));
}

// ============================================================================
// Case-insensitive keys
// ============================================================================

#[test]
fn keys_compare_case_insensitively_but_keep_original_casing() {
    let mut model = Node::new();
    model.write("Log.Level", "info").unwrap();

    assert_eq!(model.read("log.level", String::new()).unwrap(), "info");
    assert_eq!(model.keys().collect::<Vec<_>>(), vec!["Log"]);
}

#[test]
fn insert_replaces_value_keeping_stored_key_casing() {
    let mut model = Node::new();
    model.insert("Level", "info");
    let previous = model.insert("LEVEL", "debug");

    assert_eq!(previous, Some(NodeValue::String("info".to_string())));
    assert_eq!(model.keys().collect::<Vec<_>>(), vec!["Level"]);
    assert_eq!(model.get_value("level", String::new()).unwrap(), "debug");
}

#[test]
fn remove_returns_the_stored_value() {
    let mut model = Node::new();
    model.insert("key", 5);

    assert_eq!(model.remove("KEY"), Some(NodeValue::I32(5)));
    assert!(model.is_empty());
}

// ============================================================================
// Array inference
// ============================================================================

#[test]
fn contiguous_zero_based_keys_form_an_array() {
    let mut model = Node::new();
    model.insert("0", "x");
    model.insert("1", "y");
    model.insert("2", "z");

    let array = model.try_as_array().unwrap();
    assert_eq!(
        array,
        vec![
            &NodeValue::String("x".to_string()),
            &NodeValue::String("y".to_string()),
            &NodeValue::String("z".to_string()),
        ]
    );
}

#[test]
fn missing_index_disqualifies_the_array() {
    let mut model = Node::new();
    model.insert("0", "x");
    model.insert("2", "z");

    assert!(model.try_as_array().is_none());
}

#[test]
fn empty_node_and_missing_zero_are_not_arrays() {
    let mut model = Node::new();
    assert!(model.try_as_array().is_none());

    model.insert("1", "y");
    assert!(model.try_as_array().is_none());
}

#[test]
fn single_zero_key_is_a_one_element_array() {
    let mut model = Node::new();
    model.insert("0", 9);

    assert_eq!(model.try_as_array().unwrap(), vec![&NodeValue::I32(9)]);
}

#[test]
fn non_index_key_disqualifies_by_probe_outcome() {
    // The scan probes "0".."len-1" and stops at the first missing index; a
    // stray key makes the probe run past the contiguous run.
    let mut model = Node::new();
    model.insert("0", "x");
    model.insert("1", "y");
    model.insert("extra", "z");

    assert!(model.try_as_array().is_none());
}
