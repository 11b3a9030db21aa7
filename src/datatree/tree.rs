//! Displayed tree model and the document-to-tree builder
//!
//! The sidebar navigator renders one node per nodegroup, tile, and leaf
//! value of a resource document. Node kinds are a tagged variant rather
//! than an untyped payload probed for field presence:
//!
//! - `Group` heads a cardinality-N nodegroup (its children are the
//!   sibling tiles)
//! - `Tile` is one tile instance; it carries the alias of the group it
//!   belongs to, which is how the path translator recognizes that a tile
//!   sits one cardinality level below a group of the same alias
//! - `Value` is a leaf for a single node's data; it knows both its own
//!   alias and the alias of the containing nodegroup
//!
//! Child ordering mirrors the order of the corresponding entries in the
//! source document. The tree is rebuilt from the document every time the
//! document changes; node keys are minted through the stable key
//! generator so a rebuilt tree keeps the same key for every persisted
//! tile, and list renderers reconcile instead of remounting.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::document::{AliasedValue, ResourceData, TileData};
use super::stable_key::{stable_key, Atom, ObjectHandle};

/// Opaque node key, unique within one render pass
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeKey {
    Text(String),
    Number(i64),
}

impl From<&str> for NodeKey {
    fn from(value: &str) -> Self {
        NodeKey::Text(value.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(value: String) -> Self {
        NodeKey::Text(value)
    }
}

impl From<i64> for NodeKey {
    fn from(value: i64) -> Self {
        NodeKey::Number(value)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Text(text) => write!(f, "{}", text),
            NodeKey::Number(number) => write!(f, "{}", number),
        }
    }
}

/// What a tree node stands for
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Heading for a cardinality-N nodegroup
    Group { alias: String },
    /// One tile instance; `alias` names the nodegroup the tile belongs to
    Tile {
        alias: String,
        /// Absent on tiles that have not been persisted yet
        tileid: Option<String>,
    },
    /// Leaf for a single node's value; `alias` names the node itself
    Value {
        alias: String,
        nodegroup_alias: String,
    },
}

impl NodeKind {
    /// The alias this node is displayed under
    pub fn alias(&self) -> &str {
        match self {
            NodeKind::Group { alias }
            | NodeKind::Tile { alias, .. }
            | NodeKind::Value { alias, .. } => alias,
        }
    }

    /// Tile id, for tile nodes that have one
    pub fn tileid(&self) -> Option<&str> {
        match self {
            NodeKind::Tile { tileid, .. } => tileid.as_deref(),
            NodeKind::Group { .. } | NodeKind::Value { .. } => None,
        }
    }

    /// Alias of the containing nodegroup, for leaf value nodes
    pub fn nodegroup_alias(&self) -> Option<&str> {
        match self {
            NodeKind::Value {
                nodegroup_alias, ..
            } => Some(nodegroup_alias),
            NodeKind::Group { .. } | NodeKind::Tile { .. } => None,
        }
    }

    /// Leaf value nodes terminate a path translation
    pub fn is_value(&self) -> bool {
        matches!(self, NodeKind::Value { .. })
    }
}

/// A node in the displayed hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub key: NodeKey,
    pub kind: NodeKind,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(key: impl Into<NodeKey>, kind: NodeKind) -> Self {
        Self {
            key: key.into(),
            kind,
            children: Vec::new(),
        }
    }

    /// Add a child node
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Add multiple children
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Build the displayed forest for a resource document
///
/// One root node per top-level `aliased_data` entry, in document order.
/// Cardinality-1 tiles become `Tile` nodes directly; cardinality-N groups
/// become a `Group` node over one `Tile` node per sibling; empty groups
/// become childless `Group` nodes so the navigator can still offer them.
///
/// Keys are minted from `[alias, tileid]` identities, so rebuilding the
/// forest from an equal document reproduces the same keys for every
/// persisted tile. A tile with no id yet gets a fresh handle, and thus a
/// fresh key, per build.
pub fn build_tree(resource: &ResourceData) -> Vec<TreeNode> {
    resource
        .aliased_data
        .iter()
        .map(|(alias, value)| group_node(None, alias, value))
        .collect()
}

fn group_identity(parent: Option<&Atom>, alias: &str) -> Vec<Atom> {
    match parent {
        Some(parent) => vec![parent.clone(), Atom::from(alias)],
        None => vec![Atom::from(alias)],
    }
}

fn group_node(parent: Option<&Atom>, alias: &str, value: &AliasedValue) -> TreeNode {
    match value {
        AliasedValue::Tile(tile) => tile_node(alias, tile),
        AliasedValue::Tiles(tiles) => TreeNode::new(
            stable_key(group_identity(parent, alias)),
            NodeKind::Group {
                alias: alias.to_string(),
            },
        )
        .with_children(tiles.iter().map(|tile| tile_node(alias, tile)).collect()),
        AliasedValue::Node(_) => TreeNode::new(
            stable_key(group_identity(parent, alias)),
            NodeKind::Value {
                alias: alias.to_string(),
                nodegroup_alias: alias.to_string(),
            },
        ),
        AliasedValue::Empty => TreeNode::new(
            stable_key(group_identity(parent, alias)),
            NodeKind::Group {
                alias: alias.to_string(),
            },
        ),
    }
}

fn tile_node(group_alias: &str, tile: &TileData) -> TreeNode {
    let tile_atom = match tile.tileid.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => Atom::from(id),
        None => Atom::from(ObjectHandle::new()),
    };
    let children = tile
        .aliased_data
        .iter()
        .map(|(alias, value)| match value {
            AliasedValue::Node(_) => TreeNode::new(
                stable_key(vec![tile_atom.clone(), Atom::from(alias.as_str())]),
                NodeKind::Value {
                    alias: alias.clone(),
                    nodegroup_alias: group_alias.to_string(),
                },
            ),
            other => group_node(Some(&tile_atom), alias, other),
        })
        .collect();
    TreeNode::new(
        stable_key(vec![Atom::from(group_alias), tile_atom]),
        NodeKind::Tile {
            alias: group_alias.to_string(),
            tileid: tile.tileid.clone(),
        },
    )
    .with_children(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatree::testing::nested_groups_resource;

    #[test]
    fn test_forest_mirrors_document_order_and_shape() {
        let resource = nested_groups_resource();
        let forest = build_tree(&resource);

        assert_eq!(forest.len(), 1);
        let root = &forest[0];
        assert_eq!(
            root.kind,
            NodeKind::Tile {
                alias: "group_a".to_string(),
                tileid: Some("t1".to_string()),
            }
        );

        let group = &root.children[0];
        assert_eq!(
            group.kind,
            NodeKind::Group {
                alias: "group_b".to_string()
            }
        );
        let tileids: Vec<Option<&str>> = group
            .children
            .iter()
            .map(|child| child.kind.tileid())
            .collect();
        assert_eq!(tileids, [Some("t2"), Some("t3")]);
    }

    #[test]
    fn test_leaf_values_know_their_nodegroup() {
        let resource = nested_groups_resource();
        let forest = build_tree(&resource);
        let t2 = &forest[0].children[0].children[0];
        let leaf = &t2.children[0];
        assert_eq!(
            leaf.kind,
            NodeKind::Value {
                alias: "note".to_string(),
                nodegroup_alias: "group_b".to_string(),
            }
        );
        assert!(leaf.is_leaf());
    }

    #[test]
    fn test_rebuild_keeps_keys_for_persisted_tiles() {
        let resource = nested_groups_resource();
        let first = build_tree(&resource);
        let second = build_tree(&resource);
        assert_eq!(first[0].key, second[0].key);
        assert_eq!(
            first[0].children[0].children[1].key,
            second[0].children[0].children[1].key,
        );
    }

    #[test]
    fn test_unsaved_tiles_get_fresh_keys_per_build() {
        use crate::datatree::document::{AliasedValue, ResourceData, TileData};

        let resource = ResourceData::new()
            .with_entry("group_a", AliasedValue::Tile(Box::new(TileData::new())));
        let first = build_tree(&resource);
        let second = build_tree(&resource);
        assert_ne!(first[0].key, second[0].key);
    }

    #[test]
    fn test_empty_group_becomes_childless_group_node() {
        use crate::datatree::document::{AliasedValue, ResourceData};

        let resource = ResourceData::new().with_entry("group_a", AliasedValue::Empty);
        let forest = build_tree(&resource);
        assert_eq!(
            forest[0].kind,
            NodeKind::Group {
                alias: "group_a".to_string()
            }
        );
        assert!(forest[0].is_leaf());
    }
}
