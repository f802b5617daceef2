//! Shared test fixture: the blog-style authorization domain
//!
//! Roles: admin (superadmin), user, guest. The user role holds post:read and
//! post:write plus scoped edit/read permissions; the guest role holds
//! post:read and all three account grants.

use rolegate::adapters::{MemoryCache, MemoryPersistence};
use rolegate::{EntityScopeKey, Rbac, RbacConfig, RolePolicySet};
use std::sync::Arc;

pub fn fixture_config() -> RbacConfig {
    RbacConfig {
        roles: vec!["admin".into(), "user".into(), "guest".into()],
        super_admin_role: "admin".into(),
        entities: vec!["user".into(), "post".into(), "post_draft".into()],
        permissions: vec!["read".into(), "write".into(), "edit".into()],
        scopes: vec!["self".into(), "org".into(), "group".into()],
        grants: vec![
            "register".into(),
            "forgot_password".into(),
            "reset_password".into(),
        ],
        role_policies: [
            (
                "user".to_string(),
                RolePolicySet {
                    permissions: vec!["post:read".into(), "post:write".into()],
                    scoped_permissions: vec![
                        "user:edit:self".into(),
                        "post:edit:self".into(),
                        "post:edit:org".into(),
                        "post_draft:read:org".into(),
                    ],
                    grants: vec![],
                },
            ),
            (
                "guest".to_string(),
                RolePolicySet {
                    permissions: vec!["post:read".into()],
                    scoped_permissions: vec![],
                    grants: vec![
                        "register".into(),
                        "forgot_password".into(),
                        "reset_password".into(),
                    ],
                },
            ),
        ]
        .into(),
        entity_scopes: [
            (
                "post".to_string(),
                vec![
                    EntityScopeKey {
                        scope: "self".into(),
                        data_key: "createdBy".into(),
                    },
                    EntityScopeKey {
                        scope: "org".into(),
                        data_key: "orgId".into(),
                    },
                    EntityScopeKey {
                        scope: "group".into(),
                        data_key: "groupId".into(),
                    },
                ],
            ),
            (
                "post_draft".to_string(),
                vec![
                    EntityScopeKey {
                        scope: "self".into(),
                        data_key: "createdBy".into(),
                    },
                    EntityScopeKey {
                        scope: "org".into(),
                        data_key: "orgId".into(),
                    },
                ],
            ),
            (
                "user".to_string(),
                vec![EntityScopeKey {
                    scope: "self".into(),
                    data_key: "id".into(),
                }],
            ),
        ]
        .into(),
    }
}

pub async fn build() -> (Rbac, Arc<MemoryPersistence>, Arc<MemoryCache>) {
    let persistence = Arc::new(MemoryPersistence::new());
    let cache = Arc::new(MemoryCache::new());
    let rbac = Rbac::new(fixture_config(), persistence.clone(), cache.clone())
        .await
        .expect("fixture configuration must synchronize");
    (rbac, persistence, cache)
}
