//! Testing utilities and curated fixture documents
//!
//! Tests against hand-rolled JSON literals drift: each test invents its
//! own slightly-wrong document shape, and a change to the document model
//! means hunting down every literal. Tests should instead use the
//! verified fixtures here, which exercise every cardinality the document
//! model has (single tile, sibling tile array, leaf value, empty group),
//! and build trees through [`build_tree`](super::tree::build_tree) so the
//! tree and document cannot disagree unless a test drifts them on
//! purpose.

use serde_json::json;

use super::document::ResourceData;
use super::tree::{build_tree, TreeNode};

/// A resource with one cardinality-1 tile (`group_a`/`t1`) nesting a
/// cardinality-N group (`group_b`) of two sibling tiles, the first of
/// which carries a leaf value under `note`
///
/// ```text
/// group_a (t1)
/// └── group_b
///     ├── t2
///     │   └── note
///     └── t3
/// ```
pub fn nested_groups_resource() -> ResourceData {
    serde_json::from_value(json!({
        "aliased_data": {
            "group_a": {
                "aliased_data": {
                    "group_b": [
                        {
                            "aliased_data": {
                                "note": {
                                    "display_value": "first",
                                    "interchange_value": 1
                                }
                            },
                            "tileid": "t2",
                            "sortorder": 0
                        },
                        {
                            "aliased_data": {},
                            "tileid": "t3",
                            "sortorder": 1
                        }
                    ]
                },
                "tileid": "t1",
                "sortorder": 0
            }
        }
    }))
    .expect("fixture resource should deserialize")
}

/// The displayed forest for [`nested_groups_resource`]
pub fn nested_groups_forest() -> Vec<TreeNode> {
    build_tree(&nested_groups_resource())
}

/// Aliases of a borrowed node chain, for compact ancestor assertions
pub fn aliases_of<'a>(nodes: &[&'a TreeNode]) -> Vec<&'a str> {
    nodes.iter().map(|node| node.kind.alias()).collect()
}
