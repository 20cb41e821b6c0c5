//! User aggregate and permission resolution.
//!
//! A loaded `User` always carries its direct permissions and fully populated
//! roles; resolution never triggers further loading.

use serde::{Deserialize, Serialize};
use warden_core::{AppResult, NonEmptyString};

use crate::{Permission, Role};

/// User aggregate keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    email: NonEmptyString,
    superuser: bool,
    permissions: Vec<Permission>,
    roles: Vec<Role>,
}

impl User {
    /// Creates a user with no direct permissions and no roles.
    pub fn new(email: impl Into<String>, superuser: bool) -> AppResult<Self> {
        Ok(Self {
            email: NonEmptyString::new(email)?,
            superuser,
            permissions: Vec::new(),
            roles: Vec::new(),
        })
    }

    /// Creates a user from a fully loaded permission graph.
    pub fn from_parts(
        email: impl Into<String>,
        superuser: bool,
        permissions: Vec<Permission>,
        roles: Vec<Role>,
    ) -> AppResult<Self> {
        Ok(Self {
            email: NonEmptyString::new(email)?,
            superuser,
            permissions,
            roles,
        })
    }

    /// Returns the user's email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns whether the user bypasses every permission check.
    #[must_use]
    pub fn is_superuser(&self) -> bool {
        self.superuser
    }

    /// Returns the directly granted permissions.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Returns the assigned roles.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Replaces the directly granted permissions wholesale.
    pub fn replace_permissions(&mut self, permissions: Vec<Permission>) {
        self.permissions = permissions;
    }

    /// Replaces the assigned roles wholesale.
    pub fn replace_roles(&mut self, roles: Vec<Role>) {
        self.roles = roles;
    }

    /// Returns whether the user holds the named permission.
    ///
    /// Superusers hold every permission. Otherwise the name must be granted
    /// directly or through at least one role.
    #[must_use]
    pub fn has_permission(&self, name: &str) -> bool {
        if self.superuser {
            return true;
        }

        self.permissions
            .iter()
            .any(|permission| permission.name() == name)
            || self.roles.iter().any(|role| role.has_permission(name))
    }

    /// Returns whether the user holds every named permission.
    #[must_use]
    pub fn has_all_permissions<S: AsRef<str>>(&self, names: &[S]) -> bool {
        self.first_missing_permission(names).is_none()
    }

    /// Returns the first name, in the given order, the user does not hold.
    #[must_use]
    pub fn first_missing_permission<'a, S: AsRef<str>>(&self, names: &'a [S]) -> Option<&'a str> {
        names
            .iter()
            .map(AsRef::as_ref)
            .find(|name| !self.has_permission(name))
    }
}
