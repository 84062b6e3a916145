//! Bearer-token registry.
//!
//! A stand-in for the upstream auth collaborator: opaque tokens mapped to
//! user ids. Token issuance happens when a user is registered (and at
//! bootstrap for the admin); validation is a plain lookup.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use shopledger_core::UserId;

#[derive(Debug, Default)]
pub struct TokenRegistry {
    tokens: RwLock<HashMap<String, UserId>>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh opaque token for a user.
    pub fn issue(&self, user_id: UserId) -> String {
        let token = Uuid::now_v7().to_string();
        self.insert(token.clone(), user_id);
        token
    }

    /// Register a caller-provided token (bootstrap).
    pub fn insert(&self, token: impl Into<String>, user_id: UserId) {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.insert(token.into(), user_id);
        }
    }

    pub fn resolve(&self, token: &str) -> Option<UserId> {
        self.tokens.read().ok()?.get(token).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_resolve() {
        let registry = TokenRegistry::new();
        let user_id = UserId::new();
        let token = registry.issue(user_id);
        assert_eq!(registry.resolve(&token), Some(user_id));
    }

    #[test]
    fn unknown_tokens_do_not_resolve() {
        let registry = TokenRegistry::new();
        assert_eq!(registry.resolve("nope"), None);
    }
}
