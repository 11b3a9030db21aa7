//! Error types for tree navigation

use std::fmt;

/// Error type for identity-based tree node lookups
#[derive(Debug, Clone, PartialEq)]
pub enum LocateError {
    /// No node in the tree carries the requested tile id
    TileIdNotFound(String),
    /// No node in the tree carries the requested nodegroup alias
    AliasNotFound(String),
}

impl fmt::Display for LocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocateError::TileIdNotFound(tileid) => {
                write!(f, "No tree node found for tile id: {}", tileid)
            }
            LocateError::AliasNotFound(alias) => {
                write!(f, "No tree node found for nodegroup alias: {}", alias)
            }
        }
    }
}

impl std::error::Error for LocateError {}
