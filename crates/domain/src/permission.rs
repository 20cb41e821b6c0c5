use serde::{Deserialize, Serialize};
use warden_core::{AppResult, NonEmptyString};

/// Allows creating permissions.
pub const CREATE_PERMISSION: &str = "permission.create";
/// Allows creating roles.
pub const CREATE_ROLE: &str = "role.create";
/// Allows updating roles.
pub const UPDATE_ROLE: &str = "role.update";
/// Allows deleting roles.
pub const DELETE_ROLE: &str = "role.delete";
/// Allows reassigning a user's permissions and roles.
pub const UPDATE_USER: &str = "user.update";

/// Returns the permission names every deployment is seeded with, in seeding order.
#[must_use]
pub fn well_known_permissions() -> Vec<String> {
    [
        CREATE_PERMISSION,
        CREATE_ROLE,
        UPDATE_ROLE,
        DELETE_ROLE,
        UPDATE_USER,
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

/// Atomic named capability.
///
/// The name is the identity. Any non-blank string is a legal name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    name: NonEmptyString,
}

impl Permission {
    /// Creates a permission with a validated name.
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)?,
        })
    }

    /// Returns the permission name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::{Permission, well_known_permissions};

    #[test]
    fn permission_rejects_blank_name() {
        assert!(Permission::new(" ").is_err());
    }

    #[test]
    fn well_known_permissions_keep_seeding_order() {
        assert_eq!(
            well_known_permissions(),
            vec![
                "permission.create",
                "role.create",
                "role.update",
                "role.delete",
                "user.update",
            ]
        );
    }
}
