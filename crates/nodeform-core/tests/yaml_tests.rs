//! YAML codec contract tests: mapping/sequence/scalar import, the string
//! boolean heuristic and the scalar-to-node conflict rule.

use nodeform_core::{Format, ModelError, Node, NodeValue, YamlFormat};

const HEROES: &str = "\
settings:
  heroes:
    - name: Flash
      power: Speed
      debut: 1940
    - name: Superman
      power: Strength
      debut: 1938
    - name: Batman
      power: null
      debut: 1939
    - name: Wonder Woman
      power: Lasso
      debut: 1941
";

// ============================================================================
// Structural import
// ============================================================================

#[test]
fn import_builds_sequences_as_index_keyed_nodes() {
    let model = YamlFormat::new().import_str(HEROES).unwrap();

    assert_eq!(
        model.read("settings.heroes.0.name", String::new()).unwrap(),
        "Flash"
    );
    assert_eq!(
        model.read("settings.heroes.3.name", String::new()).unwrap(),
        "Wonder Woman"
    );

    let heroes = model.read_node("settings.heroes").unwrap().unwrap();
    assert_eq!(heroes.try_as_array().unwrap().len(), 4);
}

#[test]
fn import_flattens_to_every_leaf() {
    let model = YamlFormat::new().import_str(HEROES).unwrap();
    let leaves = model.flattened(true).unwrap();

    assert_eq!(leaves.len(), 12);
}

#[test]
fn import_maps_scalar_kinds() {
    let yaml = "count: 3\nratio: 2.5\nempty: null\nname: app\n";
    let model = YamlFormat::new().import_str(yaml).unwrap();

    assert_eq!(model.read("count", 0i64).unwrap(), 3);
    assert_eq!(model.read("ratio", 0.0f64).unwrap(), 2.5);
    assert_eq!(model.read::<Option<String>>("empty", None).unwrap(), None);
    assert_eq!(model.read("name", String::new()).unwrap(), "app");
}

#[test]
fn import_handles_nested_sequences() {
    let yaml = "grid:\n  - - 1\n    - 2\n  - - 3\n    - 4\n";
    let model = YamlFormat::new().import_str(yaml).unwrap();

    assert_eq!(model.read("grid.0.1", 0i64).unwrap(), 2);
    assert_eq!(model.read("grid.1.0", 0i64).unwrap(), 3);
}

#[test]
fn import_of_empty_document_leaves_the_tree_untouched() {
    let model = YamlFormat::new().import_str("").unwrap();
    assert!(model.is_empty());
}

#[test]
fn import_rejects_non_mapping_roots() {
    assert!(matches!(
        YamlFormat::new().import_str("- 1\n- 2\n"),
        Err(ModelError::Malformed(_))
    ));
    assert!(matches!(
        YamlFormat::new().import_str("just a scalar"),
        Err(ModelError::Malformed(_))
    ));
}

#[test]
fn import_rejects_non_string_keys() {
    let result = YamlFormat::new().import_str("1: one\n");
    assert!(matches!(result, Err(ModelError::Malformed(_))));
}

#[test]
fn import_propagates_parse_errors() {
    let result = YamlFormat::new().import_str("a: [unclosed");
    assert!(matches!(result, Err(ModelError::Yaml(_))));
}

// ============================================================================
// String boolean heuristic
// ============================================================================

#[test]
fn string_scalars_spelling_booleans_are_coerced() {
    // A quoted "true" cannot be told apart from a bare boolean.
    let yaml = "quoted: \"true\"\nshouting: FALSE\nplain: truthy\n";
    let model = YamlFormat::new().import_str(yaml).unwrap();

    assert!(model.read("quoted", false).unwrap());
    assert!(!model.read("shouting", true).unwrap());
    assert_eq!(model.read("plain", String::new()).unwrap(), "truthy");
}

// ============================================================================
// Conflicts and unsupported direction
// ============================================================================

#[test]
fn existing_scalar_cannot_become_a_mapping() {
    let format = YamlFormat::new();
    let mut model = Node::new();
    format.import_str_into("a: 1\n", &mut model).unwrap();

    let result = format.import_str_into("a:\n  b: 2\n", &mut model);
    assert!(matches!(result, Err(ModelError::PathConflict { .. })));
}

#[test]
fn existing_node_is_reused_for_a_mapping() {
    let format = YamlFormat::new();
    let mut model = Node::new();
    format.import_str_into("a:\n  b: 1\n", &mut model).unwrap();
    format.import_str_into("a:\n  c: 2\n", &mut model).unwrap();

    assert_eq!(model.read("a.b", 0i64).unwrap(), 1);
    assert_eq!(model.read("a.c", 0i64).unwrap(), 2);
}

#[test]
fn export_is_unsupported() {
    let result = YamlFormat::new().export_string(&Node::new());

    assert!(matches!(
        result,
        Err(ModelError::Unsupported {
            format: "YAML",
            operation: "export"
        })
    ));
}

#[test]
fn null_valued_leaf_counts_in_the_flattened_view() {
    let model = YamlFormat::new().import_str(HEROES).unwrap();

    assert_eq!(
        model.read::<Option<String>>("settings.heroes.2.power", None).unwrap(),
        None
    );
    let leaves = model.flattened(true).unwrap();
    assert!(leaves
        .iter()
        .any(|leaf| leaf.key_path_string(".") == "settings.heroes.2.power"
            && leaf.value == NodeValue::Null));
}
