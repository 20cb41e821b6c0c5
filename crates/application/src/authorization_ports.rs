mod access_tokens;
mod events;
mod health;
mod repositories;

pub use access_tokens::AccessTokenDeserializer;
pub use events::{DeliveredEvent, EventListener, EventListenerFactory};
pub use health::{DependencyHealth, DependencyStatus, HealthCheck};
pub use repositories::{PermissionRepository, RoleRepository, UserRepository};
