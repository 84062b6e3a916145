//! Resolved caller identity.

use serde::{Deserialize, Serialize};

use shopledger_core::UserId;

use crate::Role;

/// Identity of an authenticated caller, resolved upstream.
///
/// This is an authorization boundary object: write operations take it as an
/// explicit parameter. There is no ambient "logged-in user" anywhere in
/// this workspace.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub user_id: UserId,
    pub role: Role,
}

impl Caller {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }
}
