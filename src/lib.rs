//! # rolegate
//!
//! Embeddable role-based access-control decision engine.
//!
//! A statically declared model of roles, entities, permissions, scopes, and
//! grants is projected once into a persistence backend; authorization
//! queries are then answered against that backend, with a memoization cache
//! in front. Both backends are embedder-supplied trait objects, so the
//! engine is storage-agnostic.
//!
//! ## Features
//!
//! - **Declarative configuration** projected idempotently at construction
//! - **Unscoped and scoped decisions** (`can`/`can_scoped`) with a
//!   superadmin bypass and fail-closed scope resolution
//! - **Standalone grants** (`has_grant`) for capabilities not tied to an
//!   entity, such as "register"
//! - **Pluggable backends** behind async [`Persistence`] and
//!   [`DecisionCache`] contracts, with in-memory reference adapters
//!
//! ## Example
//!
//! ```rust
//! use rolegate::adapters::{MemoryCache, MemoryPersistence};
//! use rolegate::{Rbac, RbacConfig, RolePolicySet};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> rolegate::Result<()> {
//! let config = RbacConfig {
//!     roles: vec!["admin".into(), "editor".into()],
//!     super_admin_role: "admin".into(),
//!     entities: vec!["article".into()],
//!     permissions: vec!["read".into(), "write".into()],
//!     role_policies: [(
//!         "editor".to_string(),
//!         RolePolicySet {
//!             permissions: vec!["article:read".into(), "article:write".into()],
//!             ..Default::default()
//!         },
//!     )]
//!     .into(),
//!     ..Default::default()
//! };
//!
//! let rbac = Rbac::new(
//!     config,
//!     Arc::new(MemoryPersistence::new()),
//!     Arc::new(MemoryCache::new()),
//! )
//! .await?;
//!
//! assert!(rbac.can("editor", "write:article").await?);
//! assert!(rbac.can("admin", "write:article").await?); // superadmin bypass
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod persistence;
pub mod policy;
mod sync;
pub mod types;

// Re-export commonly used types
pub use cache::DecisionCache;
pub use config::{EntityScopeKey, RbacConfig, RolePolicySet};
pub use engine::Rbac;
pub use error::{RbacError, Result};
pub use persistence::Persistence;
pub use policy::Policy;
pub use types::{
    CachedDecision, EntityId, GrantId, PermissionId, RoleId, RolePolicy, ScopeId,
    ScopedRolePolicy, Subject,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
