//! Configuration projection
//!
//! One-shot synchronization of the declarative configuration into the
//! persistence backend. Runs inside [`Rbac::new`] before the engine is
//! handed to the caller; every step upserts, so re-running against an
//! unchanged configuration is a no-op with respect to persisted state.

use crate::engine::Rbac;
use crate::error::Result;
use crate::policy;
use tracing::info;

impl Rbac {
    /// Project the configuration into the persistence backend
    ///
    /// Order: roles (then the superadmin role), permissions, entities as
    /// scope namespaces, scopes, grants, then per-role assignments. Unscoped
    /// assignments go through [`grant`](Rbac::grant), which also primes the
    /// decision cache; scoped assignments and role grants write persistence
    /// edges directly. Assigning a grant that step four did not register
    /// fails with [`crate::RbacError::UnknownGrant`].
    pub async fn sync(&self) -> Result<()> {
        let config = self.config();

        for role in &config.roles {
            self.persistence().upsert_role(role).await?;
        }
        self.persistence()
            .upsert_role(&config.super_admin_role)
            .await?;

        for permission in &config.permissions {
            self.persistence().upsert_permission(permission).await?;
        }

        for entity in &config.entities {
            self.persistence().upsert_scope(entity).await?;
        }
        for scope in &config.scopes {
            self.persistence().upsert_scope(scope).await?;
        }

        for grant in &config.grants {
            self.persistence().upsert_grant(grant).await?;
        }

        for (role, set) in &config.role_policies {
            for assignment in &set.permissions {
                let parsed = policy::parse_assignment(assignment)?;
                self.grant(role, &parsed.entity, &parsed.permission).await?;
            }
            for assignment in &set.scoped_permissions {
                let parsed = policy::parse_scoped_assignment(assignment)?;
                self.persistence()
                    .grant_scoped_permission(role, &parsed)
                    .await?;
            }
            for grant in &set.grants {
                self.persistence().give_role_grant(role, grant).await?;
            }
        }

        info!(
            roles = config.roles.len(),
            permissions = config.permissions.len(),
            grants = config.grants.len(),
            "configuration projected into persistence"
        );
        Ok(())
    }
}
