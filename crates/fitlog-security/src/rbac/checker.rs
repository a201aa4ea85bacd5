//! Role and ownership checks on token claims.

use crate::Claims;
use fitlog_core::{FitlogError, FitlogResult, UserId, UserRole};

/// Extension trait for Claims to check permissions.
pub trait ClaimsExt {
    /// Requires a specific role.
    fn require_role(&self, role: UserRole) -> FitlogResult<()>;

    /// Requires either the specified role or being the resource owner.
    fn require_role_or_owner(&self, role: UserRole, resource_owner_id: UserId) -> FitlogResult<()>;

    /// Requires being the resource owner, whatever the role.
    fn require_owner(&self, resource_owner_id: UserId) -> FitlogResult<()>;

    /// Checks if the user is the owner of a resource.
    fn is_owner(&self, resource_owner_id: UserId) -> bool;

    /// Requires the user to be an admin.
    fn require_admin(&self) -> FitlogResult<()>;
}

impl ClaimsExt for Claims {
    fn require_role(&self, role: UserRole) -> FitlogResult<()> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(FitlogError::Forbidden(format!(
                "Required role: {}, your role: {}",
                role, self.role
            )))
        }
    }

    fn require_role_or_owner(&self, role: UserRole, resource_owner_id: UserId) -> FitlogResult<()> {
        if self.has_role(role) || self.is_owner(resource_owner_id) {
            Ok(())
        } else {
            Err(FitlogError::Forbidden(
                "You don't have permission to access this resource".to_string(),
            ))
        }
    }

    fn require_owner(&self, resource_owner_id: UserId) -> FitlogResult<()> {
        if self.is_owner(resource_owner_id) {
            Ok(())
        } else {
            Err(FitlogError::Forbidden(
                "Only the creator can modify this resource".to_string(),
            ))
        }
    }

    fn is_owner(&self, resource_owner_id: UserId) -> bool {
        self.user_id() == resource_owner_id
    }

    fn require_admin(&self) -> FitlogResult<()> {
        self.require_role(UserRole::Admin)
    }
}
