//! Declarative configuration for the authorization domain
//!
//! The configuration is the single registry of valid identifiers. It is
//! supplied at construction, projected into the persistence backend by the
//! synchronizer, and treated as immutable for the lifetime of the engine.

use crate::types::{EntityId, GrantId, PermissionId, RoleId, ScopeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How to resolve scope membership for one (entity, scope) pair
///
/// Declares that the subject-matching value for `scope` lives under
/// `data_key` in the caller-supplied data record (e.g. entity "post",
/// scope "org", data key "orgId").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityScopeKey {
    /// Scope this key resolves
    pub scope: ScopeId,

    /// Field of the data record holding the matching value
    pub data_key: String,
}

/// Permissions and grants assigned to one role
///
/// Assignments use the config-side composite form: `entity:permission` for
/// unscoped permissions and `entity:permission:scope` for scoped ones. Note
/// the segment order differs from query policies, which lead with the
/// permission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePolicySet {
    /// Unscoped assignments, `entity:permission`
    pub permissions: Vec<String>,

    /// Scoped assignments, `entity:permission:scope`
    #[serde(default)]
    pub scoped_permissions: Vec<String>,

    /// Standalone capabilities held by the role
    #[serde(default)]
    pub grants: Vec<GrantId>,
}

/// Immutable declarative definition of the authorization domain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Declared roles
    pub roles: Vec<RoleId>,

    /// Role that bypasses all unscoped permission checks
    pub super_admin_role: RoleId,

    /// Declared entities (object types)
    pub entities: Vec<EntityId>,

    /// Declared permissions (action verbs)
    pub permissions: Vec<PermissionId>,

    /// Declared scopes
    #[serde(default)]
    pub scopes: Vec<ScopeId>,

    /// Declared grants
    #[serde(default)]
    pub grants: Vec<GrantId>,

    /// Per-role permission and grant assignments (non-superadmin roles)
    #[serde(default)]
    pub role_policies: HashMap<RoleId, RolePolicySet>,

    /// Per-entity scope resolution keys
    #[serde(default)]
    pub entity_scopes: HashMap<EntityId, Vec<EntityScopeKey>>,
}

impl RbacConfig {
    /// Whether `permission` is a registered permission
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    /// Whether `entity` is a registered entity
    pub fn has_entity(&self, entity: &str) -> bool {
        self.entities.iter().any(|e| e == entity)
    }

    /// Whether `scope` is a registered scope
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }

    /// Whether `grant` is a registered grant
    pub fn has_grant(&self, grant: &str) -> bool {
        self.grants.iter().any(|g| g == grant)
    }

    /// Scope resolution keys declared for `entity`, if any
    pub fn scope_keys(&self, entity: &str) -> Option<&[EntityScopeKey]> {
        self.entity_scopes.get(entity).map(|keys| keys.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_lookups() {
        let config = RbacConfig {
            roles: vec!["admin".into(), "user".into()],
            super_admin_role: "admin".into(),
            entities: vec!["post".into()],
            permissions: vec!["read".into()],
            scopes: vec!["self".into()],
            grants: vec!["register".into()],
            ..Default::default()
        };

        assert!(config.has_permission("read"));
        assert!(!config.has_permission("write"));
        assert!(config.has_entity("post"));
        assert!(config.has_scope("self"));
        assert!(config.has_grant("register"));
        assert!(!config.has_grant("reset_password"));
        assert!(config.scope_keys("post").is_none());
    }

    #[test]
    fn test_config_deserializes_with_optional_sections_absent() {
        let config: RbacConfig = serde_json::from_value(json!({
            "roles": ["admin", "user"],
            "super_admin_role": "admin",
            "entities": ["post"],
            "permissions": ["read"],
            "role_policies": {
                "user": { "permissions": ["post:read"] }
            }
        }))
        .unwrap();

        assert!(config.scopes.is_empty());
        assert!(config.grants.is_empty());
        assert!(config.entity_scopes.is_empty());

        let set = &config.role_policies["user"];
        assert_eq!(set.permissions, vec!["post:read"]);
        assert!(set.scoped_permissions.is_empty());
        assert!(set.grants.is_empty());
    }
}
