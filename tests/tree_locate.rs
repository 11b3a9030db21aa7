//! Locator cases over the curated fixture forest

use rstest::rstest;

use datatree::datatree::testing::{aliases_of, nested_groups_forest};
use datatree::datatree::{locate, LocateError, NodeTarget, TreeNode};

#[rstest]
#[case::root_tile("t1", &[])]
#[case::first_sibling("t2", &["group_a", "group_b"])]
#[case::second_sibling("t3", &["group_a", "group_b"])]
fn test_locate_by_tileid(#[case] tileid: &str, #[case] expected_ancestors: &[&str]) {
    let forest = nested_groups_forest();
    let located = locate(&forest, NodeTarget::TileId(tileid)).expect("tile exists");
    assert_eq!(located.found.kind.tileid(), Some(tileid));
    assert_eq!(aliases_of(&located.ancestors), expected_ancestors);
}

#[rstest]
#[case::top_level("group_a", 0)]
#[case::nested("group_b", 1)]
#[case::leaf("note", 3)]
fn test_locate_by_alias_reports_depth(#[case] alias: &str, #[case] depth: usize) {
    let forest = nested_groups_forest();
    let located = locate(&forest, NodeTarget::GroupAlias(alias)).expect("alias exists");
    assert_eq!(located.found.kind.alias(), alias);
    assert_eq!(located.ancestors.len(), depth);
}

#[test]
fn test_locate_is_deterministic() {
    let forest = nested_groups_forest();
    let first = locate(&forest, NodeTarget::TileId("t2")).expect("t2 exists");
    let second = locate(&forest, NodeTarget::TileId("t2")).expect("t2 exists");
    assert_eq!(first, second);
}

#[test]
fn test_ancestor_chain_is_connected() {
    let forest = nested_groups_forest();
    let located = locate(&forest, NodeTarget::TileId("t3")).expect("t3 exists");

    let contains = |parent: &TreeNode, child: &TreeNode| {
        parent
            .children
            .iter()
            .any(|candidate| std::ptr::eq(candidate, child))
    };
    for pair in located.ancestors.windows(2) {
        assert!(contains(pair[0], pair[1]));
    }
    let parent = located.ancestors.last().expect("t3 is not a root");
    assert!(contains(parent, located.found));
}

#[test]
fn test_locate_failures_name_the_identity() {
    let forest = nested_groups_forest();
    assert_eq!(
        locate(&forest, NodeTarget::TileId("t9")),
        Err(LocateError::TileIdNotFound("t9".to_string())),
    );
    assert_eq!(
        locate(&[], NodeTarget::GroupAlias("group_a")),
        Err(LocateError::AliasNotFound("group_a".to_string())),
    );
    let error = locate(&forest, NodeTarget::GroupAlias("group_z")).unwrap_err();
    assert_eq!(
        error.to_string(),
        "No tree node found for nodegroup alias: group_z",
    );
}
