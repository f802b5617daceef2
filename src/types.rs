//! Core RBAC types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Unique role identifier
pub type RoleId = String;

/// Unique permission identifier
pub type PermissionId = String;

/// Unique entity identifier
pub type EntityId = String;

/// Unique scope identifier
pub type ScopeId = String;

/// Unique grant identifier
pub type GrantId = String;

/// Unscoped role→permission edge payload
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RolePolicy {
    /// Action verb (e.g. "read")
    pub permission: PermissionId,

    /// Object type the action applies to (e.g. "post")
    pub entity: EntityId,
}

/// Scoped role→permission edge payload
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopedRolePolicy {
    /// Action verb
    pub permission: PermissionId,

    /// Object type the action applies to
    pub entity: EntityId,

    /// Qualifier narrowing the permission to a data-relative subset
    pub scope: ScopeId,
}

/// Outcome memoized in the decision cache
///
/// The cache is tri-state: an absent entry means "unknown", so a stored
/// `Denied` (written by revocation) stays observably different from
/// never-cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CachedDecision {
    /// Previously computed positive decision
    Allowed,
    /// Explicitly invalidated decision
    Denied,
}

impl CachedDecision {
    /// Whether this cached outcome grants access
    pub fn allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Actor identifier(s) for scoped queries
///
/// A subject is an opaque, already-authenticated identifier supplied by the
/// caller: a single JSON scalar or a list of scalars (e.g. the org ids a
/// reader belongs to). It is matched against values extracted from the data
/// record via the configured scope keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Subject {
    /// Single identifier
    One(Value),
    /// List of identifiers; a scoped query matches if any element does
    Many(Vec<Value>),
}

impl Subject {
    /// Whether any subject identifier equals any candidate value
    pub fn matches(&self, candidates: &[&Value]) -> bool {
        match self {
            Self::One(v) => candidates.iter().any(|c| *c == v),
            Self::Many(vs) => vs
                .iter()
                .any(|v| candidates.iter().any(|c| *c == v)),
        }
    }

    /// Deterministic cache-key fragment: the identifier, or the identifiers
    /// joined by commas. Strings render unquoted.
    pub(crate) fn key_fragment(&self) -> String {
        fn scalar(v: &Value) -> String {
            match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }
        }

        match self {
            Self::One(v) => scalar(v),
            Self::Many(vs) => vs.iter().map(scalar).collect::<Vec<_>>().join(","),
        }
    }
}

impl From<Value> for Subject {
    fn from(v: Value) -> Self {
        match v {
            Value::Array(vs) => Self::Many(vs),
            other => Self::One(other),
        }
    }
}

impl From<i64> for Subject {
    fn from(v: i64) -> Self {
        Self::One(Value::from(v))
    }
}

impl From<i32> for Subject {
    fn from(v: i32) -> Self {
        Self::One(Value::from(v))
    }
}

impl From<&str> for Subject {
    fn from(v: &str) -> Self {
        Self::One(Value::from(v))
    }
}

impl From<String> for Subject {
    fn from(v: String) -> Self {
        Self::One(Value::from(v))
    }
}

impl From<Vec<i64>> for Subject {
    fn from(vs: Vec<i64>) -> Self {
        Self::Many(vs.into_iter().map(Value::from).collect())
    }
}

impl From<Vec<i32>> for Subject {
    fn from(vs: Vec<i32>) -> Self {
        Self::Many(vs.into_iter().map(Value::from).collect())
    }
}

impl From<Vec<&str>> for Subject {
    fn from(vs: Vec<&str>) -> Self {
        Self::Many(vs.into_iter().map(Value::from).collect())
    }
}

impl From<Vec<String>> for Subject {
    fn from(vs: Vec<String>) -> Self {
        Self::Many(vs.into_iter().map(Value::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_subject_matching() {
        let subject = Subject::from(1);
        let one = json!(1);
        let two = json!(2);

        assert!(subject.matches(&[&one]));
        assert!(!subject.matches(&[&two]));
        assert!(!subject.matches(&[]));
    }

    #[test]
    fn test_list_subject_matches_any_element() {
        let subject = Subject::from(vec![1, 2]);
        let two = json!(2);
        let three = json!(3);

        assert!(subject.matches(&[&two]));
        assert!(!subject.matches(&[&three]));
    }

    #[test]
    fn test_string_and_number_identifiers_stay_distinct() {
        let subject = Subject::from("1");
        let numeric = json!(1);
        assert!(!subject.matches(&[&numeric]));
    }

    #[test]
    fn test_key_fragment_rendering() {
        assert_eq!(Subject::from(7).key_fragment(), "7");
        assert_eq!(Subject::from("alice").key_fragment(), "alice");
        assert_eq!(Subject::from(vec![1, 2]).key_fragment(), "1,2");
    }

    #[test]
    fn test_subject_from_json_array() {
        let subject = Subject::from(json!([1, 2]));
        assert_eq!(subject, Subject::Many(vec![json!(1), json!(2)]));
    }

    #[test]
    fn test_cached_decision_allowed() {
        assert!(CachedDecision::Allowed.allowed());
        assert!(!CachedDecision::Denied.allowed());
    }
}
