#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use rstest::rstest;
use serde_json::{Value, json};

fn sample() -> Value {
    json!({
        "nodes": {
            "table": "cc",
            "param": [{"table": "cc", "ss": 1}, {"cc": 1}],
            "dd": ["cc"]
        }
    })
}

// ============================================================================
// find
// ============================================================================

#[test]
fn find_with_match_key_reports_table_paths() {
    let result = find(&sample(), "cc", Some("table"));
    assert_eq!(result.count, 2);
    assert_eq!(
        result.path_strings(),
        vec!["nodes/table", "nodes/param/Item #0/table"]
    );
}

#[test]
fn find_unscoped_includes_dict_keys() {
    let result = find(&sample(), "cc", None);
    assert_eq!(result.count, 4);
    assert_eq!(
        result.path_strings(),
        vec![
            "nodes/table",
            "nodes/param/Item #0/table",
            "nodes/param/Item #1/key/Item #0",
            "nodes/dd/Item #0",
        ]
    );
}

#[test]
fn find_match_key_sees_through_nested_lists() {
    let tree = json!({"agg": {"nodes": ["a", ["b", "a"]], "node": "a"}});
    let result = find(&tree, "a", Some("nodes"));
    assert_eq!(result.count, 2);
    assert_eq!(
        result.path_strings(),
        vec!["agg/nodes/Item #0", "agg/nodes/Item #1/Item #1"]
    );
}

#[test]
fn find_match_key_uses_nearest_mapping_key() {
    let tree = json!({"table": {"inner": "cc"}});
    assert_eq!(find(&tree, "cc", Some("table")).count, 0);
    assert_eq!(find(&tree, "cc", Some("inner")).count, 1);
}

#[test]
fn find_ignores_non_string_scalars() {
    let tree = json!({"a": 1, "b": true, "c": null, "d": [1.5, "1"]});
    let result = find(&tree, "1", None);
    assert_eq!(result.path_strings(), vec!["d/Item #1"]);
}

#[test]
fn find_missing_target_is_empty() {
    let result = find(&sample(), "zz", None);
    assert!(result.is_empty());
    assert!(result.paths.is_empty());
}

#[test]
fn find_scalar_root() {
    assert_eq!(find(&json!("cc"), "cc", None).count, 1);
    assert_eq!(find(&json!("cc"), "cc", Some("table")).count, 0);
}

// ============================================================================
// replace
// ============================================================================

#[test]
fn replace_with_match_key_only_touches_scoped_values() {
    let out = replace(
        &sample(),
        "cc",
        "XX",
        &ReplaceOptions::new().match_keys("table"),
    )
    .unwrap();
    assert_eq!(
        out,
        json!({
            "nodes": {
                "table": "XX",
                "param": [{"table": "XX", "ss": 1}, {"cc": 1}],
                "dd": ["cc"]
            }
        })
    );
}

#[test]
fn replace_default_mode_rewrites_values_not_keys() {
    let out = replace(&sample(), "cc", "XX", &ReplaceOptions::new()).unwrap();
    assert_eq!(out["nodes"]["table"], "XX");
    assert_eq!(out["nodes"]["dd"], json!(["XX"]));
    assert_eq!(out["nodes"]["param"][1], json!({"cc": 1}));
}

#[test]
fn replace_renames_dict_keys_in_place() {
    let tree = json!({"parameters": {"a": 1, "cc": {"type": "constant"}, "z": 2}});
    let out = replace(
        &tree,
        "cc",
        "XX",
        &ReplaceOptions::new().rename_dict_keys(true),
    )
    .unwrap();
    let keys: Vec<&String> = out["parameters"].as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["a", "XX", "z"]);
}

#[test]
fn replace_excluded_keys_are_untouched() {
    let tree = json!({"name": "cc", "type": "cc", "max_flow": "cc", "list": ["cc"]});
    let out = replace(
        &tree,
        "cc",
        "XX",
        &ReplaceOptions::new().exclude_keys(["name", "type"]),
    )
    .unwrap();
    assert_eq!(
        out,
        json!({"name": "cc", "type": "cc", "max_flow": "XX", "list": ["XX"]})
    );
}

#[test]
fn replace_without_match_returns_equal_tree() {
    let out = replace(&sample(), "zz", "XX", &ReplaceOptions::new()).unwrap();
    assert_eq!(out, sample());
}

#[test]
fn replace_is_idempotent() {
    let options = ReplaceOptions::new().rename_dict_keys(true);
    let once = replace(&sample(), "cc", "XX", &options).unwrap();
    let twice = replace(&once, "cc", "XX", &options).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn replace_leaves_no_old_occurrences_in_scope() {
    let tree = sample();
    let before = find(&tree, "cc", Some("table")).count;
    let out = replace(&tree, "cc", "XX", &ReplaceOptions::new().match_keys("table")).unwrap();
    assert_eq!(find(&out, "cc", Some("table")).count, 0);
    assert!(find(&out, "XX", Some("table")).count >= before);
}

#[test]
fn replace_reports_changed_paths() {
    let report = replace_with_report(
        &sample(),
        "cc",
        "XX",
        &ReplaceOptions::new().rename_dict_keys(true),
    )
    .unwrap();
    let paths: Vec<String> = report.paths.iter().map(ToString::to_string).collect();
    assert_eq!(
        paths,
        vec![
            "nodes/table",
            "nodes/param/Item #0/table",
            "nodes/param/Item #1/key/Item #0",
            "nodes/dd/Item #0",
        ]
    );
    assert!(report.changed());
}

#[test]
fn replace_in_place_mutates_only_on_change() {
    let mut tree = sample();
    let paths = replace_in_place(&mut tree, "zz", "XX", &ReplaceOptions::new()).unwrap();
    assert!(paths.is_empty());
    assert_eq!(tree, sample());

    let paths = replace_in_place(&mut tree, "cc", "XX", &ReplaceOptions::new()).unwrap();
    assert_eq!(paths.len(), 3);
    assert_eq!(tree["nodes"]["table"], "XX");
}

#[rstest]
#[case(ReplaceOptions::new().match_keys("a").exclude_keys("b"))]
#[case(ReplaceOptions::new().match_keys("a").rename_dict_keys(true))]
fn replace_rejects_incompatible_options(#[case] options: ReplaceOptions) {
    let err = replace(&sample(), "cc", "XX", &options).unwrap_err();
    assert!(matches!(err, TreeError::InvalidOptions(_)));
}

#[test]
fn replace_exclude_with_dict_key_rename_is_allowed() {
    let tree = json!({"cc": {"name": "cc"}});
    let out = replace(
        &tree,
        "cc",
        "XX",
        &ReplaceOptions::new()
            .rename_dict_keys(true)
            .exclude_keys("name"),
    )
    .unwrap();
    assert_eq!(out, json!({"XX": {"name": "cc"}}));
}

#[test]
fn replace_refuses_to_rename_onto_an_existing_key() {
    let tree = json!({
        "parameters": {
            "a": {"type": "constant", "value": 1},
            "b": {"type": "constant", "value": 2}
        }
    });
    let options = ReplaceOptions::new().rename_dict_keys(true);

    let err = replace(&tree, "a", "b", &options).unwrap_err();
    assert_eq!(
        err,
        TreeError::KeyCollision {
            path: "parameters".to_string(),
            key: "b".to_string(),
        }
    );

    let mut in_place = tree.clone();
    assert!(replace_in_place(&mut in_place, "a", "b", &options).is_err());
    assert_eq!(in_place, tree);
}

#[test]
fn replace_key_collision_only_applies_to_dict_key_renames() {
    let tree = json!({"a": "a", "b": "a"});
    let out = replace(&tree, "a", "b", &ReplaceOptions::new()).unwrap();
    assert_eq!(out, json!({"a": "b", "b": "b"}));
}
