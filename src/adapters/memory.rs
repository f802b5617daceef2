//! In-memory reference adapters
//!
//! Instance-scoped stores for tests and single-process embedders. All tables
//! live on the adapter instance, so multiple independent engines can coexist
//! in one process.

use crate::cache::DecisionCache;
use crate::error::{RbacError, Result};
use crate::persistence::Persistence;
use crate::types::{CachedDecision, RolePolicy, ScopedRolePolicy};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    roles: HashSet<String>,
    permissions: HashSet<String>,
    scopes: HashSet<String>,
    grants: HashSet<String>,
    role_policies: HashMap<String, Vec<RolePolicy>>,
    scoped_role_policies: HashMap<String, Vec<ScopedRolePolicy>>,
    role_grants: HashMap<String, Vec<String>>,
    subject_roles: HashMap<String, Vec<String>>,
}

/// In-memory persistence backend
///
/// Edge lists preserve insertion order and reject duplicates, so re-running
/// synchronization leaves every list at its first-run cardinality.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    tables: RwLock<Tables>,
}

impl MemoryPersistence {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

fn push_unique<T: PartialEq>(list: &mut Vec<T>, item: T) {
    if !list.contains(&item) {
        list.push(item);
    }
}

#[async_trait]
impl Persistence for MemoryPersistence {
    async fn upsert_role(&self, role: &str) -> Result<()> {
        self.tables.write().await.roles.insert(role.to_string());
        Ok(())
    }

    async fn get_role(&self, role: &str) -> Result<Option<String>> {
        Ok(self.tables.read().await.roles.get(role).cloned())
    }

    async fn upsert_permission(&self, permission: &str) -> Result<()> {
        self.tables
            .write()
            .await
            .permissions
            .insert(permission.to_string());
        Ok(())
    }

    async fn get_permission(&self, permission: &str) -> Result<Option<String>> {
        Ok(self.tables.read().await.permissions.get(permission).cloned())
    }

    async fn upsert_scope(&self, scope: &str) -> Result<()> {
        self.tables.write().await.scopes.insert(scope.to_string());
        Ok(())
    }

    async fn get_scope(&self, scope: &str) -> Result<Option<String>> {
        Ok(self.tables.read().await.scopes.get(scope).cloned())
    }

    async fn upsert_grant(&self, grant: &str) -> Result<()> {
        self.tables.write().await.grants.insert(grant.to_string());
        Ok(())
    }

    async fn get_grant(&self, grant: &str) -> Result<Option<String>> {
        Ok(self.tables.read().await.grants.get(grant).cloned())
    }

    async fn grant_role_permission(&self, role: &str, policy: &RolePolicy) -> Result<()> {
        let mut tables = self.tables.write().await;
        let list = tables.role_policies.entry(role.to_string()).or_default();
        push_unique(list, policy.clone());
        Ok(())
    }

    async fn get_role_policies(&self, role: &str) -> Result<Vec<RolePolicy>> {
        Ok(self
            .tables
            .read()
            .await
            .role_policies
            .get(role)
            .cloned()
            .unwrap_or_default())
    }

    async fn grant_scoped_permission(&self, role: &str, policy: &ScopedRolePolicy) -> Result<()> {
        let mut tables = self.tables.write().await;
        let list = tables
            .scoped_role_policies
            .entry(role.to_string())
            .or_default();
        push_unique(list, policy.clone());
        Ok(())
    }

    async fn get_role_scoped_policies(&self, role: &str) -> Result<Vec<ScopedRolePolicy>> {
        Ok(self
            .tables
            .read()
            .await
            .scoped_role_policies
            .get(role)
            .cloned()
            .unwrap_or_default())
    }

    async fn give_role_grant(&self, role: &str, grant: &str) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.grants.contains(grant) {
            return Err(RbacError::UnknownGrant(grant.to_string()));
        }
        let list = tables.role_grants.entry(role.to_string()).or_default();
        push_unique(list, grant.to_string());
        Ok(())
    }

    async fn get_role_grants(&self, role: &str) -> Result<Vec<String>> {
        Ok(self
            .tables
            .read()
            .await
            .role_grants
            .get(role)
            .cloned()
            .unwrap_or_default())
    }

    async fn grant_subject_role(&self, subject: &str, role: &str) -> Result<()> {
        let mut tables = self.tables.write().await;
        let list = tables.subject_roles.entry(subject.to_string()).or_default();
        push_unique(list, role.to_string());
        Ok(())
    }

    async fn get_actor_roles(&self, subject: &str) -> Result<Vec<String>> {
        Ok(self
            .tables
            .read()
            .await
            .subject_roles
            .get(subject)
            .cloned()
            .unwrap_or_default())
    }
}

/// In-memory decision cache
///
/// No eviction or TTL; entries live until overwritten or [`clear`]ed.
///
/// [`clear`]: MemoryCache::clear
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CachedDecision>>,
}

impl MemoryCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of stored entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl DecisionCache for MemoryCache {
    async fn set(&self, key: &str, value: CachedDecision) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<CachedDecision>> {
        Ok(self.entries.read().await.get(key).copied())
    }
}
