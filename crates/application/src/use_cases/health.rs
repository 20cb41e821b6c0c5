use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::{DependencyHealth, DependencyStatus, HealthCheck, UseCase, UseCaseResponse};

/// Aggregated dependency report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationHealth {
    /// Per-dependency results keyed by check name, in registration order.
    pub dependencies: Vec<(String, DependencyHealth)>,
}

impl ApplicationHealth {
    /// Returns whether no dependency failed. Disabled dependencies do not count.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.dependencies
            .iter()
            .all(|(_, health)| health.status != DependencyStatus::Error)
    }
}

/// Probes every registered dependency.
#[derive(Clone)]
pub struct GetApplicationHealthUseCase {
    checks: Vec<Arc<dyn HealthCheck>>,
}

impl GetApplicationHealthUseCase {
    /// Creates the use case from a list of checks.
    #[must_use]
    pub fn new(checks: Vec<Arc<dyn HealthCheck>>) -> Self {
        Self { checks }
    }
}

#[async_trait]
impl UseCase for GetApplicationHealthUseCase {
    type Request = ();
    type Output = ApplicationHealth;

    fn required_permissions(&self) -> &[&'static str] {
        &[]
    }

    async fn execute(&self, _request: ()) -> UseCaseResponse<ApplicationHealth> {
        let mut dependencies = Vec::with_capacity(self.checks.len());
        for check in &self.checks {
            dependencies.push((check.name().to_owned(), check.check().await));
        }

        Ok(ApplicationHealth { dependencies })
    }
}
