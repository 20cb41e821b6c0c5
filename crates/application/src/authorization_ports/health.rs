use async_trait::async_trait;
use serde::Serialize;

/// Outcome label for one dependency probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyStatus {
    /// Dependency answered as expected.
    Ok,
    /// Dependency failed its probe.
    Error,
    /// Dependency is not configured for this process.
    Disabled,
}

impl DependencyStatus {
    /// Returns a stable transport value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
            Self::Disabled => "disabled",
        }
    }
}

/// Result of probing one dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyHealth {
    /// Probe outcome.
    pub status: DependencyStatus,
    /// Failure detail, if any.
    pub detail: Option<String>,
}

impl DependencyHealth {
    /// Healthy probe result.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: DependencyStatus::Ok,
            detail: None,
        }
    }

    /// Failed probe result with a detail message.
    #[must_use]
    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            status: DependencyStatus::Error,
            detail: Some(detail.into()),
        }
    }

    /// Probe result for an unconfigured dependency.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            status: DependencyStatus::Disabled,
            detail: None,
        }
    }
}

/// Port probing one external dependency.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Stable dependency name used in health reports.
    fn name(&self) -> &'static str;

    /// Probes the dependency.
    async fn check(&self) -> DependencyHealth;
}
