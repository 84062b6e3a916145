//! User records and the in-memory user directory.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopledger_core::{DomainError, DomainResult, UserId};

use crate::{authorize::require_role, Caller, Role};

/// A user known to the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// In-memory directory of users.
///
/// Backs the admin-only "update user role" operation. Credential handling
/// (passwords, tokens) lives with the transport layer, not here.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: RwLock<HashMap<UserId, User>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user with the given role.
    pub fn register(
        &self,
        email: impl Into<String>,
        display_name: impl Into<String>,
        role: Role,
    ) -> DomainResult<User> {
        let email = email.into().trim().to_lowercase();
        let display_name = display_name.into().trim().to_string();

        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }
        if display_name.is_empty() {
            return Err(DomainError::validation("display name cannot be empty"));
        }

        let mut users = self.users.write().map_err(|_| poisoned())?;
        if users.values().any(|u| u.email == email) {
            return Err(DomainError::conflict(format!(
                "email already registered: {email}"
            )));
        }

        let user = User {
            id: UserId::new(),
            email,
            display_name,
            role,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    pub fn get(&self, user_id: &UserId) -> Option<User> {
        self.users.read().ok()?.get(user_id).cloned()
    }

    /// All users, ordered by id (creation order for v7 ids).
    pub fn list(&self) -> Vec<User> {
        let users = match self.users.read() {
            Ok(guard) => guard,
            Err(_) => return Vec::new(),
        };
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.id);
        all
    }

    /// Change a user's role. Admin-only; idempotent.
    pub fn update_role(
        &self,
        actor: &Caller,
        user_id: UserId,
        new_role: Role,
    ) -> DomainResult<User> {
        require_role(actor, Role::Admin)?;

        let mut users = self.users.write().map_err(|_| poisoned())?;
        let user = users.get_mut(&user_id).ok_or(DomainError::NotFound)?;
        user.role = new_role;
        Ok(user.clone())
    }
}

fn poisoned() -> DomainError {
    DomainError::conflict("user directory lock poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Caller {
        Caller::new(UserId::new(), Role::Admin)
    }

    #[test]
    fn register_and_get() {
        let dir = UserDirectory::new();
        let user = dir.register("alice@example.com", "Alice", Role::Employee).unwrap();
        assert_eq!(dir.get(&user.id).unwrap().email, "alice@example.com");
    }

    #[test]
    fn register_normalizes_email() {
        let dir = UserDirectory::new();
        let user = dir.register("  Bob@Example.COM ", "Bob", Role::Manager).unwrap();
        assert_eq!(user.email, "bob@example.com");
    }

    #[test]
    fn register_rejects_invalid_email() {
        let dir = UserDirectory::new();
        let err = dir.register("not-an-email", "Carol", Role::Employee).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn register_rejects_duplicate_email() {
        let dir = UserDirectory::new();
        dir.register("dave@example.com", "Dave", Role::Employee).unwrap();
        let err = dir.register("dave@example.com", "Dave II", Role::Employee).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn update_role_requires_admin() {
        let dir = UserDirectory::new();
        let user = dir.register("eve@example.com", "Eve", Role::Employee).unwrap();

        let manager = Caller::new(UserId::new(), Role::Manager);
        let err = dir.update_role(&manager, user.id, Role::Manager).unwrap_err();
        assert!(matches!(err, DomainError::Forbidden { .. }));

        let updated = dir.update_role(&admin(), user.id, Role::Manager).unwrap();
        assert_eq!(updated.role, Role::Manager);
        assert_eq!(dir.get(&user.id).unwrap().role, Role::Manager);
    }

    #[test]
    fn update_role_is_idempotent() {
        let dir = UserDirectory::new();
        let user = dir.register("frank@example.com", "Frank", Role::Manager).unwrap();

        dir.update_role(&admin(), user.id, Role::Manager).unwrap();
        let again = dir.update_role(&admin(), user.id, Role::Manager).unwrap();
        assert_eq!(again.role, Role::Manager);
    }

    #[test]
    fn update_role_unknown_user_is_not_found() {
        let dir = UserDirectory::new();
        let err = dir.update_role(&admin(), UserId::new(), Role::Admin).unwrap_err();
        assert!(matches!(err, DomainError::NotFound));
    }

    #[test]
    fn list_is_ordered_by_id() {
        let dir = UserDirectory::new();
        let a = dir.register("a@example.com", "A", Role::Employee).unwrap();
        let b = dir.register("b@example.com", "B", Role::Employee).unwrap();
        let listed: Vec<UserId> = dir.list().into_iter().map(|u| u.id).collect();
        let mut expected = vec![a.id, b.id];
        expected.sort();
        assert_eq!(listed, expected);
    }
}
