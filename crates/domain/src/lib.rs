//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod events;
mod permission;
mod role;
mod user;

pub use events::{EventDecodeError, EventPayload, UserCreatedEvent};
pub use permission::{
    CREATE_PERMISSION, CREATE_ROLE, DELETE_ROLE, Permission, UPDATE_ROLE, UPDATE_USER,
    well_known_permissions,
};
pub use role::Role;
pub use user::User;
