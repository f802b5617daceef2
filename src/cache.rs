//! Decision cache contract and cache-key construction
//!
//! The cache is a pure latency optimization: every read has a
//! persistence-backed fallback, and no decision path may treat a cached value
//! as the sole source of truth. The core mandates no eviction, TTL, or
//! invalidation policy.

use crate::error::Result;
use crate::types::{CachedDecision, Subject};
use async_trait::async_trait;

/// Memoization store for decision outcomes
///
/// `get` returning `None` means "unknown"; combined with
/// [`CachedDecision`]'s two variants this gives the tri-state
/// unknown/allowed/denied a revocation marker needs to stay distinguishable
/// from an absent entry.
#[async_trait]
pub trait DecisionCache: Send + Sync {
    /// Store a decision outcome under `key`
    async fn set(&self, key: &str, value: CachedDecision) -> Result<()>;

    /// Fetch a previously stored outcome, if any
    async fn get(&self, key: &str) -> Result<Option<CachedDecision>>;
}

/// Cache-key builders shared by every read and write path
///
/// Keeping key construction in one place is what guarantees a key primed by
/// `grant` is the key `can` later reads. Identifiers are embedded verbatim;
/// colons inside identifiers are not escaped.
pub mod keys {
    use super::Subject;

    /// Key for an unscoped permission decision
    pub fn role_permission(role: &str, permission: &str, entity: &str) -> String {
        format!("{role}:{permission}:{entity}")
    }

    /// Key for a scoped permission decision
    pub fn scoped_permission(
        role: &str,
        permission: &str,
        entity: &str,
        scope: &str,
        subject: &Subject,
    ) -> String {
        format!(
            "{role}:{permission}:{entity}:{scope}:{}",
            subject.key_fragment()
        )
    }

    /// Key for a grant membership decision
    pub fn role_grant(role: &str, grant: &str) -> String {
        format!("{role}:{grant}")
    }

    /// Key for a subject→role assignment decision
    pub fn subject_role(subject: &str, role: &str) -> String {
        format!("sub:{subject}:role:{role}")
    }
}
