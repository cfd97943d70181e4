//! Cache abstraction for per-owner note lists.
//!
//! The cache holds a derived, possibly-absent, never-authoritative copy of
//! each owner's note list. A lookup is tri-state so the repository can route
//! miss and unavailable through the same store-fallback path while logging
//! them apart.

use async_trait::async_trait;
use uuid::Uuid;

/// Cache key for a user's note list: `notes:{ownerId}`.
///
/// One entry per owning user, not per collaborator-visible view.
pub fn owner_notes_key(owner_id: Uuid) -> String {
    format!("notes:{}", owner_id)
}

/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// A value was present at the key.
    Hit(String),
    /// The key was absent (distinct from an empty cached list).
    Miss,
    /// The cache could not be reached or the backend errored.
    Unavailable,
}

/// How far cache invalidation reaches on mutation of a shared note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheConsistency {
    /// Invalidate only the owner's `notes:{owner}` entry. Collaborators may
    /// observe stale list contents until their own entry expires or one of
    /// their own writes invalidates it.
    #[default]
    Eventual,
    /// Additionally invalidate every collaborator's entry.
    Strict,
}

impl CacheConsistency {
    /// Parse from configuration (`"strict"` or `"eventual"`, case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "eventual" => Some(Self::Eventual),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }
}

/// Key-value cache used as a read-through accelerator.
///
/// Implementations must never surface backend failures: `get` reports
/// `Unavailable`, `set`/`delete` report `false`. The cache is an
/// optimization, never a dependency for correctness.
#[async_trait]
pub trait ListCache: Send + Sync {
    /// Look up a serialized note list.
    async fn get(&self, key: &str) -> CacheLookup;

    /// Store a serialized note list. Returns whether the write happened.
    async fn set(&self, key: &str, value: &str) -> bool;

    /// Drop a key. Returns whether the delete was issued successfully.
    async fn delete(&self, key: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_notes_key_format() {
        let owner = Uuid::nil();
        assert_eq!(
            owner_notes_key(owner),
            "notes:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_same_owner_same_key() {
        let owner = Uuid::new_v4();
        assert_eq!(owner_notes_key(owner), owner_notes_key(owner));

        let other = Uuid::new_v4();
        assert_ne!(owner_notes_key(owner), owner_notes_key(other));
    }

    #[test]
    fn test_consistency_parse() {
        assert_eq!(
            CacheConsistency::parse("strict"),
            Some(CacheConsistency::Strict)
        );
        assert_eq!(
            CacheConsistency::parse("Eventual"),
            Some(CacheConsistency::Eventual)
        );
        assert_eq!(CacheConsistency::parse("bogus"), None);
    }

    #[test]
    fn test_hit_distinguishes_empty_list_from_miss() {
        let hit = CacheLookup::Hit("[]".to_string());
        assert_ne!(hit, CacheLookup::Miss);
    }
}
