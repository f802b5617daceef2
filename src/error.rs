//! Error types for the RBAC engine

use thiserror::Error;

/// RBAC engine errors
///
/// A denied decision is never an error; decision methods return `Ok(false)`.
/// Errors cover structural misuse (bad policy strings, unregistered grants)
/// and failures raised by the persistence or cache backend, which propagate
/// unmodified.
#[derive(Debug, Error)]
pub enum RbacError {
    /// Policy string with the wrong number of colon-delimited segments
    #[error("malformed policy string '{0}': expected 'permission:entity' or 'permission:entity:scope'")]
    MalformedPolicy(String),

    /// Permission segment not present in the configured permission set
    #[error("unknown permission: {0}")]
    UnknownPermission(String),

    /// Entity segment not present in the configured entity set
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// Scope segment not present in the configured scope set
    #[error("unknown scope: {0}")]
    UnknownScope(String),

    /// Grant id referenced before it was registered
    #[error("grant not registered: {0}")]
    UnknownGrant(String),

    /// Scoped policy passed to the unscoped query path
    #[error("policy '{0}' carries a scope; subject and data are required")]
    MissingScopeArgs(String),

    /// Unscoped policy passed to the scoped query path
    #[error("policy '{0}' carries no scope; subject and data do not apply")]
    UnexpectedScopeArgs(String),

    /// Failure raised by the persistence backend
    #[error("persistence backend error: {0}")]
    Persistence(String),

    /// Failure raised by the cache backend
    #[error("cache backend error: {0}")]
    Cache(String),
}

/// Result type for RBAC operations
pub type Result<T> = std::result::Result<T, RbacError>;
