//! Stable key generation for UI list reconciliation
//!
//! Repeated UI elements need a reconciliation key that survives re-renders:
//! the same logical identity must always map to the same synthetic key.
//! This module memoizes keys process-wide in three caches, one per identity
//! shape:
//!
//! - primitive atoms are memoized by value
//! - object handles are memoized per handle (reference identity stands
//!   behind an arena-issued integer, so two handles minted for two equal
//!   objects still get different keys)
//! - lists of atoms descend a shared prefix-trie, so structurally equal
//!   lists share one key no matter how many times they are rebuilt
//!
//! Keys come from a single monotonically-advancing counter rendered as a
//! string. Uniqueness across calls is the only contract; callers must not
//! parse or order the generated keys.
//!
//! Caches are unbounded and never evicted; they are bounded in practice by
//! the number of distinct identities seen in one process lifetime.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Process-unique handle standing in for object reference identity.
///
/// Issued from a process-wide counter at construction time. Two handles
/// minted separately are never equal, even when the objects they were
/// minted for have equal contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(u64);

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

impl ObjectHandle {
    /// Issue a fresh, never-before-seen handle
    pub fn new() -> Self {
        ObjectHandle(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ObjectHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// A single identity element: a primitive value or an object handle
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Atom {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    Handle(ObjectHandle),
}

impl From<&str> for Atom {
    fn from(value: &str) -> Self {
        Atom::Text(value.to_string())
    }
}

impl From<String> for Atom {
    fn from(value: String) -> Self {
        Atom::Text(value)
    }
}

impl From<i64> for Atom {
    fn from(value: i64) -> Self {
        Atom::Int(value)
    }
}

impl From<bool> for Atom {
    fn from(value: bool) -> Self {
        Atom::Bool(value)
    }
}

impl From<ObjectHandle> for Atom {
    fn from(value: ObjectHandle) -> Self {
        Atom::Handle(value)
    }
}

/// An identity value submitted for key generation
///
/// Lists are compared structurally over their atoms; everything else is a
/// single atom. A handle inside a list keeps its reference-identity
/// semantics per element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    Atom(Atom),
    List(Vec<Atom>),
}

impl From<Atom> for Identity {
    fn from(value: Atom) -> Self {
        Identity::Atom(value)
    }
}

impl From<Vec<Atom>> for Identity {
    fn from(value: Vec<Atom>) -> Self {
        Identity::List(value)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Identity::Atom(value.into())
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Identity::Atom(value.into())
    }
}

impl From<i64> for Identity {
    fn from(value: i64) -> Self {
        Identity::Atom(value.into())
    }
}

impl From<bool> for Identity {
    fn from(value: bool) -> Self {
        Identity::Atom(value.into())
    }
}

impl From<ObjectHandle> for Identity {
    fn from(value: ObjectHandle) -> Self {
        Identity::Atom(value.into())
    }
}

/// One trie node per unique atom at each list depth; the key for a
/// complete list lives in the terminal node's `key` slot.
#[derive(Default)]
struct KeyTrie {
    children: HashMap<Atom, KeyTrie>,
    key: Option<String>,
}

struct KeyCaches {
    next: u64,
    by_value: HashMap<Atom, String>,
    by_handle: HashMap<ObjectHandle, String>,
    lists: KeyTrie,
}

static CACHES: Lazy<Mutex<KeyCaches>> = Lazy::new(|| {
    Mutex::new(KeyCaches {
        next: 1,
        by_value: HashMap::new(),
        by_handle: HashMap::new(),
        lists: KeyTrie::default(),
    })
});

fn fresh_key(next: &mut u64) -> String {
    let key = next.to_string();
    *next += 1;
    key
}

/// Return the memoized key for an identity, minting one on first sight
///
/// Never fails; every identity, including `Atom::Null`, has a defined key.
pub fn stable_key(identity: impl Into<Identity>) -> String {
    let identity = identity.into();
    // A poisoned lock still holds structurally sound caches
    let mut caches = CACHES
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    match identity {
        Identity::Atom(Atom::Handle(handle)) => {
            let KeyCaches {
                next, by_handle, ..
            } = &mut *caches;
            by_handle
                .entry(handle)
                .or_insert_with(|| fresh_key(next))
                .clone()
        }
        Identity::Atom(atom) => {
            let KeyCaches { next, by_value, .. } = &mut *caches;
            by_value
                .entry(atom)
                .or_insert_with(|| fresh_key(next))
                .clone()
        }
        Identity::List(atoms) => {
            let KeyCaches { next, lists, .. } = &mut *caches;
            let mut node = lists;
            for atom in atoms {
                node = node.children.entry(atom).or_default();
            }
            node.key.get_or_insert_with(|| fresh_key(next)).clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_identity_is_by_value() {
        assert_eq!(stable_key(5), stable_key(5));
        assert_eq!(stable_key("x"), stable_key("x"));
        assert_eq!(stable_key(Atom::Null), stable_key(Atom::Null));
        assert_ne!(stable_key(5), stable_key(6));
        assert_ne!(stable_key("x"), stable_key("y"));
    }

    #[test]
    fn test_distinct_atom_kinds_do_not_collide() {
        assert_ne!(stable_key(0), stable_key(false));
        assert_ne!(stable_key(Atom::Null), stable_key(false));
        // The string "7" and the integer 7 are different identities
        assert_ne!(stable_key("7"), stable_key(7));
    }

    #[test]
    fn test_handle_identity_is_by_reference() {
        let first = ObjectHandle::new();
        let second = ObjectHandle::new();
        assert_eq!(stable_key(first), stable_key(first));
        assert_ne!(stable_key(first), stable_key(second));
    }

    #[test]
    fn test_list_identity_is_structural() {
        let shared = ObjectHandle::new();
        let first = vec![Atom::Int(1), Atom::from("a"), Atom::from(shared)];
        let second = vec![Atom::Int(1), Atom::from("a"), Atom::from(shared)];
        assert_eq!(stable_key(first), stable_key(second));
    }

    #[test]
    fn test_list_key_changes_with_any_element() {
        let base = vec![Atom::Int(1), Atom::from("a")];
        let changed = vec![Atom::Int(2), Atom::from("a")];
        let reordered = vec![Atom::from("a"), Atom::Int(1)];
        assert_ne!(stable_key(base.clone()), stable_key(changed));
        assert_ne!(stable_key(base), stable_key(reordered));
    }

    #[test]
    fn test_list_prefix_does_not_collide_with_shorter_list() {
        let short = vec![Atom::from("group_a")];
        let long = vec![Atom::from("group_a"), Atom::from("t1")];
        assert_ne!(stable_key(short), stable_key(long));
    }

    #[test]
    fn test_empty_list_has_a_key() {
        assert_eq!(stable_key(Vec::new()), stable_key(Vec::new()));
    }

    #[test]
    fn test_handles_inside_lists_keep_reference_identity() {
        let first = ObjectHandle::new();
        let second = ObjectHandle::new();
        assert_ne!(
            stable_key(vec![Atom::from("alias"), Atom::from(first)]),
            stable_key(vec![Atom::from("alias"), Atom::from(second)]),
        );
    }
}
