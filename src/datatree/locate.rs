//! Tree node lookups
//!
//! Two lookups with deliberately different failure policies:
//!
//! - [`locate`] finds a node by identity (tile id or nodegroup alias) and
//!   hard-fails with [`LocateError`] when nothing matches. Its callers
//!   always expect the node to exist (for instance, locating the node for
//!   the tile currently open in the editor) and would dereference an
//!   absent result.
//! - [`node_at_path`] walks an access path against the tree and soft-fails:
//!   a path that does not lead to a node yields `found: None`.
//!
//! Both are pure reads over the given forest.

use super::error::LocateError;
use super::path::PathSegment;
use super::tree::TreeNode;

/// Which node to look for; exactly one criterion per call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeTarget<'a> {
    /// Match a tile node by its tile id
    TileId(&'a str),
    /// Match the first node displayed under a nodegroup alias
    GroupAlias(&'a str),
}

impl NodeTarget<'_> {
    fn matches(&self, node: &TreeNode) -> bool {
        match *self {
            NodeTarget::TileId(tileid) => node.kind.tileid() == Some(tileid),
            NodeTarget::GroupAlias(alias) => node.kind.alias() == alias,
        }
    }

    fn not_found(&self) -> LocateError {
        match *self {
            NodeTarget::TileId(tileid) => LocateError::TileIdNotFound(tileid.to_string()),
            NodeTarget::GroupAlias(alias) => LocateError::AliasNotFound(alias.to_string()),
        }
    }
}

/// A found node plus the chain of nodes above it
#[derive(Debug, Clone, PartialEq)]
pub struct Located<'a> {
    pub found: &'a TreeNode,
    /// Every node on the route from root to the found node, excluding the
    /// found node itself, in root-to-parent order
    pub ancestors: Vec<&'a TreeNode>,
}

/// Find a node by identity, with the ancestor chain leading to it
///
/// Depth-first pre-order over each root in turn; sibling order decides
/// precedence and the first match wins. A match's descendants are not
/// searched, so the match need not be a leaf.
pub fn locate<'a>(
    forest: &'a [TreeNode],
    target: NodeTarget<'_>,
) -> Result<Located<'a>, LocateError> {
    let mut ancestors = Vec::new();
    match search(forest, target, &mut ancestors) {
        Some(found) => {
            // Ancestors were collected bottom-up while the recursion unwound
            ancestors.reverse();
            Ok(Located { found, ancestors })
        }
        None => Err(target.not_found()),
    }
}

fn search<'a>(
    nodes: &'a [TreeNode],
    target: NodeTarget<'_>,
    ancestors: &mut Vec<&'a TreeNode>,
) -> Option<&'a TreeNode> {
    for node in nodes {
        if target.matches(node) {
            return Some(node);
        }
        if let Some(found) = search(&node.children, target, ancestors) {
            ancestors.push(node);
            return Some(found);
        }
    }
    None
}

/// Result of walking an access path against the tree
#[derive(Debug, Clone, PartialEq)]
pub struct PathLookup<'a> {
    pub found: Option<&'a TreeNode>,
    /// Nodes traversed above the found node, root first; empty when
    /// nothing was found
    pub ancestors: Vec<&'a TreeNode>,
}

#[derive(Clone, Copy)]
enum Cursor<'a> {
    Forest(&'a [TreeNode]),
    Node(&'a TreeNode),
}

fn children_of<'a>(cursor: Cursor<'a>) -> &'a [TreeNode] {
    match cursor {
        Cursor::Forest(nodes) => nodes,
        Cursor::Node(node) => &node.children,
    }
}

/// Walk an access path against the tree to the node it denotes
///
/// `aliased_data` segments are structural to the document, not the tree,
/// and are skipped. A string segment selects the first child displayed
/// under that alias; an integer segment selects the n-th child carrying
/// the immediately preceding alias (so `["group_b", 1]` is the second
/// `group_b` sibling). An index with no preceding alias, or out of range
/// of the matching siblings, ends the walk with nothing found.
pub fn node_at_path<'a>(forest: &'a [TreeNode], path: &[PathSegment]) -> PathLookup<'a> {
    let cleaned: Vec<&PathSegment> = path
        .iter()
        .filter(|segment| !segment.is_aliased_data())
        .collect();

    let mut cursor: Option<Cursor<'a>> = Some(Cursor::Forest(forest));
    let mut node_path: Vec<&'a TreeNode> = Vec::new();
    let mut previous_alias: Option<&'a str> = None;

    for segment in cleaned {
        let Some(current) = cursor else { break };
        let candidates = children_of(current);

        match segment {
            PathSegment::Key(alias) => {
                match candidates
                    .iter()
                    .find(|candidate| candidate.kind.alias() == alias.as_str())
                {
                    Some(matched) => {
                        node_path.push(matched);
                        previous_alias = Some(matched.kind.alias());
                        cursor = Some(Cursor::Node(matched));
                    }
                    None => {
                        cursor = None;
                        break;
                    }
                }
            }
            PathSegment::Index(index) => {
                let Some(previous) = previous_alias else {
                    cursor = None;
                    break;
                };
                let siblings: Vec<&TreeNode> = candidates
                    .iter()
                    .filter(|candidate| candidate.kind.alias() == previous)
                    .collect();
                if *index >= siblings.len() {
                    cursor = None;
                    break;
                }
                let matched = siblings[*index];
                node_path.push(matched);
                cursor = Some(Cursor::Node(matched));
            }
        }
    }

    let found = match cursor {
        Some(Cursor::Node(node)) => Some(node),
        Some(Cursor::Forest(_)) | None => None,
    };
    let ancestors = if found.is_some() {
        node_path[..node_path.len() - 1].to_vec()
    } else {
        Vec::new()
    };
    PathLookup { found, ancestors }
}
