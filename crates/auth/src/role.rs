//! Caller roles.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use shopledger_core::DomainError;

/// Role granted to an authenticated caller.
///
/// Roles form a strict ladder: every permission an `Employee` has is also
/// held by a `Manager`, and everything a `Manager` has is held by an
/// `Admin`. The derived ordering encodes that ladder.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Manager,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }

    /// Whether a caller holding this role clears a gate requiring `required`.
    pub fn allows(self, required: Role) -> bool {
        self >= required
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" => Ok(Role::Employee),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            other => Err(DomainError::validation(format!(
                "unknown role '{other}' (expected employee, manager or admin)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ladder_is_ordered() {
        assert!(Role::Admin.allows(Role::Manager));
        assert!(Role::Admin.allows(Role::Employee));
        assert!(Role::Manager.allows(Role::Employee));
        assert!(!Role::Employee.allows(Role::Manager));
        assert!(!Role::Manager.allows(Role::Admin));
        assert!(Role::Employee.allows(Role::Employee));
    }

    #[test]
    fn parse_known_roles() {
        assert_eq!("employee".parse::<Role>().unwrap(), Role::Employee);
        assert_eq!("manager".parse::<Role>().unwrap(), Role::Manager);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn parse_rejects_unknown_role() {
        let err = "superuser".parse::<Role>().unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("superuser")),
            _ => panic!("expected Validation error"),
        }
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
    }
}
