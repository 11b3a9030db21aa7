//! Access paths and the tree-to-document path translator
//!
//! An access path is the ordered key/index sequence that locates a value
//! inside a resource document: alternating `aliased_data` sentinels,
//! alias keys, and sibling-array indices. Paths serialize to plain JSON
//! arrays (`["aliased_data", "group_a", 1, ...]`), which is the form the
//! editors exchange.
//!
//! [`tile_path`] computes the path for a selected tree node. It is
//! deliberately soft-failing: an unknown selection key yields an empty
//! path, and a document that has drifted from the tree yields the path
//! accumulated from tree structure alone, which may not fully resolve.
//! Callers tolerate such dangling paths (a newly created tile, for
//! instance, has a tree node before the document has anything under it).

use serde::{Deserialize, Serialize};

use super::document::{DocumentCursor, ResourceData, TileData};
use super::tree::{NodeKey, TreeNode};

/// The mapping key nested under every resource and tile
pub const ALIASED_DATA: &str = "aliased_data";

/// One step of an access path: an alias key or a sibling-array index
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    pub fn key(value: impl Into<String>) -> Self {
        PathSegment::Key(value.into())
    }

    /// Whether this segment is the `aliased_data` sentinel
    pub fn is_aliased_data(&self) -> bool {
        matches!(self, PathSegment::Key(key) if key == ALIASED_DATA)
    }
}

impl From<&str> for PathSegment {
    fn from(value: &str) -> Self {
        PathSegment::Key(value.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(value: String) -> Self {
        PathSegment::Key(value)
    }
}

impl From<usize> for PathSegment {
    fn from(value: usize) -> Self {
        PathSegment::Index(value)
    }
}

/// Find the root-to-target chain for a selection key, pre-order, first
/// match
fn chain_by_key<'a>(nodes: &'a [TreeNode], target: &NodeKey) -> Option<Vec<&'a TreeNode>> {
    for node in nodes {
        if node.key == *target {
            return Some(vec![node]);
        }
        if !node.children.is_empty() {
            if let Some(mut descendants) = chain_by_key(&node.children, target) {
                let mut chain = Vec::with_capacity(descendants.len() + 1);
                chain.push(node);
                chain.append(&mut descendants);
                return Some(chain);
            }
        }
    }
    None
}

/// Resolve which element of a sibling tile array corresponds to `next`
///
/// Priority order: the structural position of `next` among `node`'s
/// children (tree and document known to be in sync), then the array
/// element whose tile id matches `next`'s (order drifted but identities
/// are stable), then index 0. Singleton arrays and ambiguous multi-element
/// misses both land on the first element; callers tolerate the dangling
/// path an ambiguous miss can produce.
fn resolve_array_index(tiles: &[TileData], node: &TreeNode, next: &TreeNode) -> usize {
    const FALLBACK: usize = 0;

    if let Some(position) = node
        .children
        .iter()
        .position(|child| std::ptr::eq(child, next))
    {
        return position;
    }

    if let Some(tileid) = next.kind.tileid().filter(|id| !id.is_empty()) {
        if let Some(position) = tiles
            .iter()
            .position(|tile| tile.tileid.as_deref() == Some(tileid))
        {
            return position;
        }
    }

    FALLBACK
}

/// Compute the access path for the tree node selected by `selected_key`
///
/// Returns an empty path when the key is not present in the tree. The
/// walk never fails against the document: lookups that miss leave the
/// document cursor dangling and segments keep accumulating from tree
/// structure alone.
pub fn tile_path(
    resource: &ResourceData,
    forest: &[TreeNode],
    selected_key: &NodeKey,
) -> Vec<PathSegment> {
    let chain = match chain_by_key(forest, selected_key) {
        Some(chain) => chain,
        None => return Vec::new(),
    };

    let mut path = vec![PathSegment::key(ALIASED_DATA)];
    let mut cursor: Option<DocumentCursor<'_>> =
        Some(DocumentCursor::Aliased(&resource.aliased_data));

    for (position, node) in chain.iter().enumerate() {
        // Leaf value nodes terminate the walk at their own alias
        if node.kind.is_value() {
            path.push(PathSegment::key(node.kind.alias()));
            break;
        }

        let alias = node.kind.alias();
        let parent_alias = position.checked_sub(1).map(|i| chain[i].kind.alias());

        // A tile node one cardinality level under its group shares the
        // group's alias; pushing it again would duplicate the segment
        if parent_alias != Some(alias) {
            path.push(PathSegment::key(alias));
            cursor = match cursor {
                Some(DocumentCursor::Aliased(aliased)) => {
                    aliased.get(alias).map(DocumentCursor::from)
                }
                _ => None,
            };
        }

        if let Some(DocumentCursor::Tiles(tiles)) = cursor {
            if let Some(next) = chain.get(position + 1) {
                let index = resolve_array_index(tiles, node, next);
                path.push(PathSegment::Index(index));
                cursor = tiles.get(index).map(DocumentCursor::Tile);
            }
        }

        if let Some(DocumentCursor::Tile(tile)) = cursor {
            path.push(PathSegment::key(ALIASED_DATA));
            cursor = Some(DocumentCursor::Aliased(&tile.aliased_data));
        }
    }

    path
}

/// Apply an access path against a document
///
/// Repeatedly dereferences alternating map keys and array indices from
/// the document root. Returns `None` as soon as a segment fails to
/// resolve, which is how editors detect a dangling path.
pub fn resolve_path<'a>(
    resource: &'a ResourceData,
    path: &[PathSegment],
) -> Option<DocumentCursor<'a>> {
    let mut cursor = DocumentCursor::Resource(resource);
    for segment in path {
        cursor = match (cursor, segment) {
            (DocumentCursor::Resource(resource), PathSegment::Key(key))
                if key == ALIASED_DATA =>
            {
                DocumentCursor::Aliased(&resource.aliased_data)
            }
            (DocumentCursor::Tile(tile), PathSegment::Key(key)) if key == ALIASED_DATA => {
                DocumentCursor::Aliased(&tile.aliased_data)
            }
            (DocumentCursor::Aliased(aliased), PathSegment::Key(key)) => {
                DocumentCursor::from(aliased.get(key)?)
            }
            (DocumentCursor::Tiles(tiles), PathSegment::Index(index)) => {
                DocumentCursor::Tile(tiles.get(*index)?)
            }
            _ => return None,
        };
    }
    Some(cursor)
}
