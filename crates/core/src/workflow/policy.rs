//! Authorization policy for approval decisions.
//!
//! Whether an actor may decide a step is a pure table lookup from the step's
//! required permission string to the set of roles allowed to hold it. New
//! permissions are added as table entries, never as code branches.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// User role within a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular employee; submits gated actions but decides nothing.
    Employee,
    /// Approves operational steps.
    Manager,
    /// Full approval capability.
    Admin,
}

impl UserRole {
    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "employee" => Some(Self::Employee),
            "manager" => Some(Self::Manager),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Permission-string to role-set lookup table.
///
/// Unknown permissions and unknown roles are denied. The default table covers
/// the built-in modules; tenants with custom chains extend it via [`grant`].
///
/// [`grant`]: AuthorizationPolicy::grant
#[derive(Debug, Clone)]
pub struct AuthorizationPolicy {
    table: HashMap<String, Vec<UserRole>>,
}

impl Default for AuthorizationPolicy {
    fn default() -> Self {
        let mut policy = Self {
            table: HashMap::new(),
        };
        policy.grant("inventory.approve", &[UserRole::Manager, UserRole::Admin]);
        policy.grant("hr.approve", &[UserRole::Manager, UserRole::Admin]);
        policy.grant("finance.approve", &[UserRole::Manager, UserRole::Admin]);
        policy.grant("finance.audit", &[UserRole::Admin]);
        policy
    }
}

impl AuthorizationPolicy {
    /// Creates an empty policy (deny everything).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Grants a permission to a set of roles, replacing any previous grant.
    pub fn grant(&mut self, permission: &str, roles: &[UserRole]) {
        self.table.insert(permission.to_string(), roles.to_vec());
    }

    /// Returns true if an actor with `role` may decide a step requiring
    /// `permission`. Pure predicate, no side effects.
    #[must_use]
    pub fn can_approve(&self, role: &str, permission: &str) -> bool {
        let Some(role) = UserRole::parse(role) else {
            return false;
        };
        self.table
            .get(permission)
            .is_some_and(|roles| roles.contains(&role))
    }

    /// Returns the roles granted a permission, if any.
    #[must_use]
    pub fn roles_for(&self, permission: &str) -> Option<&[UserRole]> {
        self.table.get(permission).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::Employee, UserRole::Manager, UserRole::Admin] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::parse("MANAGER"), Some(UserRole::Manager));
        assert_eq!(UserRole::parse("superuser"), None);
    }

    #[rstest]
    #[case("manager", "inventory.approve", true)]
    #[case("admin", "inventory.approve", true)]
    #[case("employee", "inventory.approve", false)]
    #[case("manager", "finance.audit", false)]
    #[case("admin", "finance.audit", true)]
    #[case("manager", "unknown.permission", false)]
    #[case("not-a-role", "inventory.approve", false)]
    fn test_default_policy(#[case] role: &str, #[case] permission: &str, #[case] allowed: bool) {
        let policy = AuthorizationPolicy::default();
        assert_eq!(policy.can_approve(role, permission), allowed);
    }

    #[test]
    fn test_empty_policy_denies_everything() {
        let policy = AuthorizationPolicy::empty();
        assert!(!policy.can_approve("admin", "inventory.approve"));
    }

    #[test]
    fn test_grant_extends_without_code_changes() {
        let mut policy = AuthorizationPolicy::default();
        assert!(!policy.can_approve("manager", "procurement.approve"));

        policy.grant("procurement.approve", &[UserRole::Manager]);
        assert!(policy.can_approve("manager", "procurement.approve"));
        assert!(!policy.can_approve("admin", "procurement.approve"));
    }

    #[test]
    fn test_grant_replaces_previous_roles() {
        let mut policy = AuthorizationPolicy::default();
        policy.grant("inventory.approve", &[UserRole::Admin]);
        assert!(!policy.can_approve("manager", "inventory.approve"));
        assert!(policy.can_approve("admin", "inventory.approve"));
    }
}
