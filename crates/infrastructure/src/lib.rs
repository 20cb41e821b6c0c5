//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod dependency_health_checks;
mod in_memory_authorization_repositories;
mod jwt_access_token_deserializer;
mod postgres_permission_repository;
mod postgres_role_repository;
mod postgres_user_repository;
mod redis_stream_event_listener;

pub use dependency_health_checks::{PostgresHealthCheck, RedisHealthCheck};
pub use in_memory_authorization_repositories::{
    InMemoryPermissionRepository, InMemoryRoleRepository, InMemoryUserRepository,
};
pub use jwt_access_token_deserializer::{JwtAccessTokenDeserializer, load_iam_signing_key};
pub use postgres_permission_repository::PostgresPermissionRepository;
pub use postgres_role_repository::PostgresRoleRepository;
pub use postgres_user_repository::PostgresUserRepository;
pub use redis_stream_event_listener::{RedisStreamEventListenerFactory, RedisStreamSettings};
