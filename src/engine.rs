//! Authorization decision engine
//!
//! Evaluates queries cache-first with a persistence fallback and maintains
//! grant and role assignments. The engine holds no locks; every operation is
//! a sequence of awaited backend calls, and a cache write is not atomic with
//! its persistence write.

use crate::cache::{keys, DecisionCache};
use crate::config::RbacConfig;
use crate::error::{RbacError, Result};
use crate::persistence::Persistence;
use crate::policy::Policy;
use crate::types::{CachedDecision, RolePolicy, Subject};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// RBAC decision and synchronization engine
///
/// Constructed via [`Rbac::new`], which projects the configuration into the
/// persistence backend before returning, so every engine handed to a caller
/// is ready to serve queries.
pub struct Rbac {
    config: RbacConfig,
    persistence: Arc<dyn Persistence>,
    cache: Arc<dyn DecisionCache>,
}

impl Rbac {
    /// Construct the engine and run synchronization once
    pub async fn new(
        config: RbacConfig,
        persistence: Arc<dyn Persistence>,
        cache: Arc<dyn DecisionCache>,
    ) -> Result<Self> {
        let engine = Self {
            config,
            persistence,
            cache,
        };
        engine.sync().await?;
        Ok(engine)
    }

    /// The configuration this engine was built from
    pub fn config(&self) -> &RbacConfig {
        &self.config
    }

    pub(crate) fn persistence(&self) -> &dyn Persistence {
        self.persistence.as_ref()
    }

    /// May `role` perform the unscoped `policy` (`permission:entity`)?
    ///
    /// The superadmin role is allowed unconditionally, with no cache or
    /// persistence lookup. Otherwise the cache is consulted first; on a miss
    /// the role's persisted policies decide, and only a positive outcome is
    /// written back (denials are recomputed on every call).
    pub async fn can(&self, role: &str, policy: &str) -> Result<bool> {
        let parsed = Policy::parse(policy)?;
        parsed.validate(&self.config)?;
        let Policy::Unscoped { permission, entity } = parsed else {
            return Err(RbacError::MissingScopeArgs(policy.to_string()));
        };

        if role == self.config.super_admin_role {
            debug!(role, policy, "superadmin bypass");
            return Ok(true);
        }

        let key = keys::role_permission(role, &permission, &entity);
        if let Some(cached) = self.cache.get(&key).await? {
            debug!(%key, ?cached, "cache hit");
            return Ok(cached.allowed());
        }

        let policies = self.persistence.get_role_policies(role).await?;
        let allowed = policies
            .iter()
            .any(|p| p.permission == permission && p.entity == entity);
        if allowed {
            self.cache.set(&key, CachedDecision::Allowed).await?;
        }

        debug!(role, policy, allowed, "unscoped decision");
        Ok(allowed)
    }

    /// May `role` perform the scoped `policy` (`permission:entity:scope`)
    /// on the entity instance described by `data`, acting as `subject`?
    ///
    /// Resolution is fail-closed: an entity with no declared scope keys, or a
    /// data record missing every relevant key, denies rather than errors.
    /// This path reads the cache but never writes it, and the superadmin
    /// bypass does not apply.
    pub async fn can_scoped(
        &self,
        role: &str,
        policy: &str,
        subject: impl Into<Subject>,
        data: &Value,
    ) -> Result<bool> {
        let parsed = Policy::parse(policy)?;
        parsed.validate(&self.config)?;
        let Policy::Scoped {
            permission,
            entity,
            scope,
        } = parsed
        else {
            return Err(RbacError::UnexpectedScopeArgs(policy.to_string()));
        };
        let subject = subject.into();

        let key = keys::scoped_permission(role, &permission, &entity, &scope, &subject);
        if let Some(cached) = self.cache.get(&key).await? {
            debug!(%key, ?cached, "cache hit");
            return Ok(cached.allowed());
        }

        let Some(scope_keys) = self.config.scope_keys(&entity) else {
            warn!(entity = %entity, "no scope keys declared for entity; denying");
            return Ok(false);
        };

        let policies = self.persistence.get_role_scoped_policies(role).await?;
        let held = policies
            .iter()
            .any(|p| p.permission == permission && p.entity == entity && p.scope == scope);
        if !held {
            debug!(role, policy, "scoped policy not held");
            return Ok(false);
        }

        let candidates: Vec<&Value> = scope_keys
            .iter()
            .filter(|k| k.scope == scope)
            .filter_map(|k| data.get(&k.data_key))
            .collect();
        if candidates.is_empty() {
            debug!(role, policy, "no scope values resolved from data");
            return Ok(false);
        }

        let allowed = subject.matches(&candidates);
        debug!(role, policy, allowed, "scoped decision");
        Ok(allowed)
    }

    /// Does `role` hold the standalone capability `grant`?
    ///
    /// Same caching policy as the unscoped [`can`](Rbac::can) path: positive
    /// outcomes only.
    pub async fn has_grant(&self, role: &str, grant: &str) -> Result<bool> {
        let key = keys::role_grant(role, grant);
        if let Some(cached) = self.cache.get(&key).await? {
            debug!(%key, ?cached, "cache hit");
            return Ok(cached.allowed());
        }

        let grants = self.persistence.get_role_grants(role).await?;
        if !grants.iter().any(|g| g == grant) {
            return Ok(false);
        }

        self.cache.set(&key, CachedDecision::Allowed).await?;
        Ok(true)
    }

    /// Give `role` the unscoped (permission, entity) pair
    ///
    /// Idempotently registers the role and permission, creates the edge, and
    /// primes the same cache key [`can`](Rbac::can) reads.
    pub async fn grant(&self, role: &str, entity: &str, permission: &str) -> Result<()> {
        self.persistence.upsert_role(role).await?;
        self.persistence.upsert_permission(permission).await?;
        self.persistence
            .grant_role_permission(
                role,
                &RolePolicy {
                    permission: permission.to_string(),
                    entity: entity.to_string(),
                },
            )
            .await?;

        let key = keys::role_permission(role, permission, entity);
        self.cache.set(&key, CachedDecision::Allowed).await?;
        debug!(role, entity, permission, "permission granted");
        Ok(())
    }

    /// Assign `role` to `subject`
    pub async fn grant_role(&self, subject: &str, role: &str) -> Result<()> {
        self.persistence.upsert_role(role).await?;
        self.persistence.grant_subject_role(subject, role).await?;
        self.cache
            .set(&keys::subject_role(subject, role), CachedDecision::Allowed)
            .await?;
        debug!(subject, role, "role granted");
        Ok(())
    }

    /// Revoke `role` from `subject`
    ///
    /// Revocation does not delete the persisted edge; it writes a `Denied`
    /// marker over the subject-role cache key. [`has_role`](Rbac::has_role)
    /// honors the marker, but a backend read still reports the edge.
    pub async fn revoke_role(&self, subject: &str, role: &str) -> Result<()> {
        self.persistence.upsert_role(role).await?;
        self.persistence.grant_subject_role(subject, role).await?;
        self.cache
            .set(&keys::subject_role(subject, role), CachedDecision::Denied)
            .await?;
        debug!(subject, role, "role revoked");
        Ok(())
    }

    /// Does `subject` currently hold `role`?
    ///
    /// Tri-state cache read first (a revocation marker denies); falls back
    /// to the persisted subject→role edges.
    pub async fn has_role(&self, subject: &str, role: &str) -> Result<bool> {
        let key = keys::subject_role(subject, role);
        if let Some(cached) = self.cache.get(&key).await? {
            debug!(%key, ?cached, "cache hit");
            return Ok(cached.allowed());
        }

        let roles = self.persistence.get_actor_roles(subject).await?;
        Ok(roles.iter().any(|r| r == role))
    }

    /// All roles persisted for `subject`
    pub async fn roles_of(&self, subject: &str) -> Result<Vec<String>> {
        self.persistence.get_actor_roles(subject).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MemoryCache, MemoryPersistence};
    use crate::config::RolePolicySet;
    use serde_json::json;

    async fn engine() -> Rbac {
        let config = RbacConfig {
            roles: vec!["admin".into(), "editor".into()],
            super_admin_role: "admin".into(),
            entities: vec!["article".into()],
            permissions: vec!["read".into(), "write".into()],
            scopes: vec!["self".into()],
            role_policies: [(
                "editor".to_string(),
                RolePolicySet {
                    permissions: vec!["article:write".into()],
                    ..Default::default()
                },
            )]
            .into(),
            ..Default::default()
        };

        Rbac::new(
            config,
            Arc::new(MemoryPersistence::new()),
            Arc::new(MemoryCache::new()),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_superadmin_bypass_is_unconditional() {
        let rbac = engine().await;
        assert!(rbac.can("admin", "write:article").await.unwrap());
        assert!(rbac.can("admin", "read:article").await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_policy_segments_error_even_for_superadmin() {
        let rbac = engine().await;
        assert!(matches!(
            rbac.can("admin", "publish:article").await,
            Err(RbacError::UnknownPermission(_))
        ));
        assert!(matches!(
            rbac.can("admin", "read:comment").await,
            Err(RbacError::UnknownEntity(_))
        ));
    }

    #[tokio::test]
    async fn test_scoped_policy_on_unscoped_path_errors() {
        let rbac = engine().await;
        assert!(matches!(
            rbac.can("editor", "write:article:self").await,
            Err(RbacError::MissingScopeArgs(_))
        ));
    }

    #[tokio::test]
    async fn test_unscoped_policy_on_scoped_path_errors() {
        let rbac = engine().await;
        let err = rbac
            .can_scoped("editor", "write:article", 1, &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, RbacError::UnexpectedScopeArgs(_)));
    }

    #[tokio::test]
    async fn test_grant_then_can() {
        let rbac = engine().await;
        assert!(!rbac.can("editor", "read:article").await.unwrap());

        rbac.grant("editor", "article", "read").await.unwrap();
        assert!(rbac.can("editor", "read:article").await.unwrap());
    }

    #[tokio::test]
    async fn test_scoped_query_without_declared_scope_keys_denies() {
        let rbac = engine().await;
        rbac.persistence()
            .grant_scoped_permission(
                "editor",
                &crate::types::ScopedRolePolicy {
                    permission: "write".into(),
                    entity: "article".into(),
                    scope: "self".into(),
                },
            )
            .await
            .unwrap();

        // Edge exists, but no entity scope keys are configured.
        let allowed = rbac
            .can_scoped("editor", "write:article:self", 1, &json!({ "id": 1 }))
            .await
            .unwrap();
        assert!(!allowed);
    }

    #[tokio::test]
    async fn test_grant_and_revoke_role() {
        let rbac = engine().await;

        rbac.grant_role("7", "editor").await.unwrap();
        assert!(rbac.has_role("7", "editor").await.unwrap());
        assert_eq!(rbac.roles_of("7").await.unwrap(), vec!["editor"]);

        rbac.revoke_role("7", "editor").await.unwrap();
        assert!(!rbac.has_role("7", "editor").await.unwrap());
        // Current behavior: the persisted edge is retained.
        assert_eq!(rbac.roles_of("7").await.unwrap(), vec!["editor"]);
    }
}
