//! Role-based capability checks.
//!
//! The identity collaborator authenticates callers and supplies their role;
//! this module only answers whether a role may perform an operation. Gating
//! is a plain capability check passed into the dispatch layer, not
//! middleware.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Caller role supplied by the external identity collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    User,
}

/// What an operation needs from its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Queries and listings.
    Read,
    /// Anything that mutates content or the taxonomy.
    Write,
}

impl Role {
    /// Returns true if the role grants the capability.
    pub fn permits(self, capability: Capability) -> bool {
        match (self, capability) {
            (Role::Admin, _) => true,
            (Role::User, Capability::Read) => true,
            (Role::User, Capability::Write) => false,
        }
    }

    /// Fails with [`AppError::Forbidden`] unless the role grants the
    /// capability.
    pub fn authorize(self, capability: Capability) -> Result<(), AppError> {
        if self.permits(capability) {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "Operation not permitted for this role",
                json!({ "role": self, "capability": capability }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_permits_everything() {
        assert!(Role::Admin.permits(Capability::Read));
        assert!(Role::Admin.permits(Capability::Write));
    }

    #[test]
    fn test_user_is_read_only() {
        assert!(Role::User.permits(Capability::Read));
        assert!(!Role::User.permits(Capability::Write));
    }

    #[test]
    fn test_authorize_surfaces_forbidden() {
        let err = Role::User.authorize(Capability::Write).unwrap_err();
        assert_eq!(err.code(), "forbidden");
        assert!(Role::User.authorize(Capability::Read).is_ok());
    }
}
