//! Resource document model
//!
//! A resource document is the nested, polymorphic JSON structure one
//! resource instance serializes to. The top level carries an
//! `aliased_data` mapping from nodegroup alias to either a single tile
//! (cardinality-1), an ordered sequence of sibling tiles (cardinality-N),
//! a leaf node value, or `null` for a group with no data yet. Each tile
//! nests its own `aliased_data` mapping, recursively.
//!
//! Two things about the shape are load-bearing for everything downstream:
//!
//! - Entry order inside `aliased_data` is significant. The displayed tree
//!   mirrors it, so the mappings are insertion-ordered.
//! - A tile's position within a sibling array is not index-stable across
//!   document reloads. Anything that must survive a reload resolves tiles
//!   by `tileid`, not by raw index, whenever an id is available.
//!
//! The polymorphic nodegroup value is a tagged enum here rather than the
//! wire format's bare union; serde's untagged representation keeps the
//! JSON identical to what the server produces.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Insertion-ordered mapping from alias to the data stored under it
pub type AliasedData = IndexMap<String, AliasedValue>;

/// One entry in an `aliased_data` mapping
///
/// Variant order matters: serde tries untagged variants top to bottom, so
/// arrays must be tried before single tiles and tiles before leaf nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AliasedValue {
    /// Cardinality-N group: ordered sibling tiles
    Tiles(Vec<TileData>),
    /// Cardinality-1 group: a single tile
    Tile(Box<TileData>),
    /// Leaf value captured by a single node
    Node(NodeData),
    /// Group present in the schema but empty on this resource (JSON `null`)
    Empty,
}

/// One record within a nodegroup, possibly nesting further groups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TileData {
    pub aliased_data: AliasedData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodegroup: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parenttile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisionaledits: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resourceinstance: Option<String>,
    #[serde(default)]
    pub sortorder: i64,
    /// Absent on tiles that have not been persisted yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tileid: Option<String>,
}

impl TileData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tileid(mut self, tileid: impl Into<String>) -> Self {
        self.tileid = Some(tileid.into());
        self
    }

    /// Add an entry to this tile's `aliased_data`
    pub fn with_entry(mut self, alias: impl Into<String>, value: AliasedValue) -> Self {
        self.aliased_data.insert(alias.into(), value);
        self
    }
}

/// Leaf value for a single node, as display text plus its raw value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub display_value: String,
    #[serde(default)]
    pub interchange_value: Value,
}

impl NodeData {
    pub fn new(display_value: impl Into<String>, interchange_value: Value) -> Self {
        Self {
            display_value: display_value.into(),
            interchange_value,
        }
    }
}

/// One resource instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    pub aliased_data: AliasedData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resourceinstanceid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayname: Option<String>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to the resource's top-level `aliased_data`
    pub fn with_entry(mut self, alias: impl Into<String>, value: AliasedValue) -> Self {
        self.aliased_data.insert(alias.into(), value);
        self
    }
}

/// A borrowed position inside a resource document
///
/// The typed counterpart of a raw JSON pointer: applying access-path
/// segments moves a cursor through the document, and lookups that miss
/// leave no cursor at all rather than a dangling one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DocumentCursor<'a> {
    Resource(&'a ResourceData),
    Aliased(&'a AliasedData),
    Tiles(&'a [TileData]),
    Tile(&'a TileData),
    Node(&'a NodeData),
    Empty,
}

impl<'a> From<&'a AliasedValue> for DocumentCursor<'a> {
    fn from(value: &'a AliasedValue) -> Self {
        match value {
            AliasedValue::Tiles(tiles) => DocumentCursor::Tiles(tiles),
            AliasedValue::Tile(tile) => DocumentCursor::Tile(tile),
            AliasedValue::Node(node) => DocumentCursor::Node(node),
            AliasedValue::Empty => DocumentCursor::Empty,
        }
    }
}

/// Depth-first search for the first value stored under `node_alias`
///
/// Sibling order decides precedence; nested tiles are searched before
/// later siblings at the same level. Returns `None` when no entry under
/// the alias exists anywhere in the subtree.
pub fn find_aliased_value<'a>(
    aliased_data: &'a AliasedData,
    node_alias: &str,
) -> Option<&'a AliasedValue> {
    for (alias, value) in aliased_data {
        if alias == node_alias {
            return Some(value);
        }
        match value {
            AliasedValue::Tile(tile) => {
                if let Some(found) = find_aliased_value(&tile.aliased_data, node_alias) {
                    return Some(found);
                }
            }
            AliasedValue::Tiles(tiles) => {
                for tile in tiles {
                    if let Some(found) = find_aliased_value(&tile.aliased_data, node_alias) {
                        return Some(found);
                    }
                }
            }
            AliasedValue::Node(_) | AliasedValue::Empty => {}
        }
    }
    None
}
