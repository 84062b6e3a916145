//! Pure role checks.

use shopledger_core::{DomainError, DomainResult};

use crate::{Caller, Role};

/// Check that `caller` clears a gate requiring `required`.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn require_role(caller: &Caller, required: Role) -> DomainResult<()> {
    if caller.role.allows(required) {
        Ok(())
    } else {
        Err(DomainError::forbidden(required.as_str()))
    }
}
