//! Policy string parsing and validation
//!
//! Two colon-delimited composite forms exist, with opposite segment order:
//! query policies lead with the permission (`permission:entity[:scope]`),
//! config assignments lead with the entity (`entity:permission[:scope]`).
//! Colons are not escaped within identifiers.

use crate::config::RbacConfig;
use crate::error::{RbacError, Result};
use crate::types::{RolePolicy, ScopedRolePolicy};

/// Parsed query policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Policy {
    /// `permission:entity`
    Unscoped {
        /// Action verb
        permission: String,
        /// Object type
        entity: String,
    },
    /// `permission:entity:scope`
    Scoped {
        /// Action verb
        permission: String,
        /// Object type
        entity: String,
        /// Data-relative qualifier
        scope: String,
    },
}

impl Policy {
    /// Parse a query policy string
    ///
    /// Two segments yield [`Policy::Unscoped`], three yield
    /// [`Policy::Scoped`]; any other segment count, or an empty segment, is
    /// [`RbacError::MalformedPolicy`].
    pub fn parse(raw: &str) -> Result<Self> {
        match split_segments(raw)?.as_slice() {
            [permission, entity] => Ok(Self::Unscoped {
                permission: (*permission).to_string(),
                entity: (*entity).to_string(),
            }),
            [permission, entity, scope] => Ok(Self::Scoped {
                permission: (*permission).to_string(),
                entity: (*entity).to_string(),
                scope: (*scope).to_string(),
            }),
            _ => Err(RbacError::MalformedPolicy(raw.to_string())),
        }
    }

    /// Validate every segment against the configured identifier registry
    ///
    /// Unknown segments are rejected with a structural error rather than
    /// silently evaluating to a denial.
    pub fn validate(&self, config: &RbacConfig) -> Result<()> {
        let (permission, entity, scope) = match self {
            Self::Unscoped { permission, entity } => (permission, entity, None),
            Self::Scoped {
                permission,
                entity,
                scope,
            } => (permission, entity, Some(scope)),
        };

        if !config.has_permission(permission) {
            return Err(RbacError::UnknownPermission(permission.clone()));
        }
        if !config.has_entity(entity) {
            return Err(RbacError::UnknownEntity(entity.clone()));
        }
        if let Some(scope) = scope {
            if !config.has_scope(scope) {
                return Err(RbacError::UnknownScope(scope.clone()));
            }
        }

        Ok(())
    }
}

/// Parse a config-side unscoped assignment (`entity:permission`)
pub(crate) fn parse_assignment(raw: &str) -> Result<RolePolicy> {
    match split_segments(raw)?.as_slice() {
        [entity, permission] => Ok(RolePolicy {
            permission: (*permission).to_string(),
            entity: (*entity).to_string(),
        }),
        _ => Err(RbacError::MalformedPolicy(raw.to_string())),
    }
}

/// Parse a config-side scoped assignment (`entity:permission:scope`)
pub(crate) fn parse_scoped_assignment(raw: &str) -> Result<ScopedRolePolicy> {
    match split_segments(raw)?.as_slice() {
        [entity, permission, scope] => Ok(ScopedRolePolicy {
            permission: (*permission).to_string(),
            entity: (*entity).to_string(),
            scope: (*scope).to_string(),
        }),
        _ => Err(RbacError::MalformedPolicy(raw.to_string())),
    }
}

fn split_segments(raw: &str) -> Result<Vec<&str>> {
    let segments: Vec<&str> = raw.split(':').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(RbacError::MalformedPolicy(raw.to_string()));
    }
    Ok(segments)
}
