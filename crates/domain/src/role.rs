use serde::{Deserialize, Serialize};
use warden_core::{AppResult, NonEmptyString};

use crate::Permission;

/// Named bag of permissions assignable to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    name: NonEmptyString,
    permissions: Vec<Permission>,
}

impl Role {
    /// Creates a role holding the given permissions. The set may be empty.
    pub fn new(name: impl Into<String>, permissions: Vec<Permission>) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)?,
            permissions,
        })
    }

    /// Returns the role name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the permissions owned by this role.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Returns whether this role directly owns the named permission.
    #[must_use]
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions
            .iter()
            .any(|permission| permission.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::Role;
    use crate::Permission;

    fn permission(name: &str) -> Permission {
        match Permission::new(name) {
            Ok(permission) => permission,
            Err(error) => panic!("invalid test permission: {error}"),
        }
    }

    #[test]
    fn empty_role_grants_nothing() {
        let role = Role::new("viewer", Vec::new());
        assert!(matches!(role, Ok(ref role) if !role.has_permission("role.create")));
    }

    #[test]
    fn role_grants_only_owned_permissions() {
        let role = match Role::new("admin", vec![permission("role.create")]) {
            Ok(role) => role,
            Err(error) => panic!("invalid test role: {error}"),
        };

        assert!(role.has_permission("role.create"));
        assert!(!role.has_permission("role.delete"));
    }
}
