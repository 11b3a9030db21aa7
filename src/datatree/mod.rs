//! Tree navigation and path reconciliation for nested resource documents
//!
//! A resource instance serializes to a nested, polymorphic JSON document:
//! per-alias mappings of tiles, sibling tile arrays, and leaf values
//! (see [document]). A navigator UI displays that document as a tree of
//! nodes (see [tree]) and needs to move between the two representations
//! every time the user selects something:
//!
//! - [locate](locate::locate) finds a tree node by tile id or nodegroup
//!   alias, with the ancestor chain a navigator expands and highlights
//! - [tile_path](path::tile_path) translates a selected tree node into
//!   the access path editors use to read and write the document
//! - [node_at_path](locate::node_at_path) walks an access path back to
//!   the tree node it denotes
//! - [stable_key](stable_key::stable_key) memoizes reconciliation keys so
//!   rebuilt trees keep stable identity for list renderers
//!
//! All of it is synchronous and pure: the tree and document are immutable
//! snapshots for the duration of one call, nothing here does I/O, and the
//! only process-wide state is the stable key caches.
//!
//! ## Modules
//!
//! - `document` - resource document model and document-side search
//! - `tree` - displayed tree model and the document-to-tree builder
//! - `locate` - identity-based and path-directed tree lookups
//! - `path` - access paths, translation, and application
//! - `stable_key` - memoized reconciliation keys
//! - `error` - error types for the hard-failing lookups
//! - `testing` - curated fixtures for tests

pub mod document;
pub mod error;
pub mod locate;
pub mod path;
pub mod stable_key;
pub mod testing;
pub mod tree;

// Re-export commonly used types at module root
pub use document::{
    find_aliased_value, AliasedData, AliasedValue, DocumentCursor, NodeData, ResourceData,
    TileData,
};
pub use error::LocateError;
pub use locate::{locate, node_at_path, Located, NodeTarget, PathLookup};
pub use path::{resolve_path, tile_path, PathSegment, ALIASED_DATA};
pub use stable_key::{stable_key, Atom, Identity, ObjectHandle};
pub use tree::{build_tree, NodeKey, NodeKind, TreeNode};
