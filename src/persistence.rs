//! Persistence contract
//!
//! The durable store behind the engine: roles, permissions, scopes, grants,
//! and the edges between them. The engine issues one awaited call per step
//! and holds no locks of its own; atomicity between concurrent writers is
//! the backend's responsibility.

use crate::error::Result;
use crate::types::{RolePolicy, ScopedRolePolicy};
use async_trait::async_trait;

/// Durable store of the authorization model
///
/// Every `upsert_*` is idempotent: calling it twice with the same identifier
/// leaves state unchanged beyond the first call, and no edge-creating
/// operation may produce duplicate edges. Backend failures surface as
/// [`crate::RbacError::Persistence`] and propagate to the caller unmodified.
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Register a role
    async fn upsert_role(&self, role: &str) -> Result<()>;

    /// Look up a registered role
    async fn get_role(&self, role: &str) -> Result<Option<String>>;

    /// Register a permission
    async fn upsert_permission(&self, permission: &str) -> Result<()>;

    /// Look up a registered permission
    async fn get_permission(&self, permission: &str) -> Result<Option<String>>;

    /// Register a scope (entities are also registered here, as scope
    /// namespace placeholders)
    async fn upsert_scope(&self, scope: &str) -> Result<()>;

    /// Look up a registered scope
    async fn get_scope(&self, scope: &str) -> Result<Option<String>>;

    /// Register a grant
    async fn upsert_grant(&self, grant: &str) -> Result<()>;

    /// Look up a registered grant
    async fn get_grant(&self, grant: &str) -> Result<Option<String>>;

    /// Create an unscoped role→permission edge
    async fn grant_role_permission(&self, role: &str, policy: &RolePolicy) -> Result<()>;

    /// Unscoped policies held by `role`
    async fn get_role_policies(&self, role: &str) -> Result<Vec<RolePolicy>>;

    /// Create a scoped role→permission edge
    async fn grant_scoped_permission(&self, role: &str, policy: &ScopedRolePolicy) -> Result<()>;

    /// Scoped policies held by `role`
    async fn get_role_scoped_policies(&self, role: &str) -> Result<Vec<ScopedRolePolicy>>;

    /// Create a role→grant edge; must fail with
    /// [`crate::RbacError::UnknownGrant`] if `grant` was never registered
    async fn give_role_grant(&self, role: &str, grant: &str) -> Result<()>;

    /// Grant ids held by `role`
    async fn get_role_grants(&self, role: &str) -> Result<Vec<String>>;

    /// Create a subject→role edge
    async fn grant_subject_role(&self, subject: &str, role: &str) -> Result<()>;

    /// Role ids held by `subject`
    async fn get_actor_roles(&self, subject: &str) -> Result<Vec<String>>;
}
