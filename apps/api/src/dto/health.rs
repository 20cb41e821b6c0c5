use std::collections::BTreeMap;

use serde::Serialize;
use ts_rs::TS;
use warden_application::{ApplicationHealth, DependencyHealth};

/// Dependency status entry in health response payloads.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-dependency-response.ts"
)]
pub struct HealthDependencyResponse {
    pub status: String,
    pub detail: Option<String>,
}

impl From<DependencyHealth> for HealthDependencyResponse {
    fn from(value: DependencyHealth) -> Self {
        Self {
            status: value.status.as_str().to_owned(),
            detail: value.detail,
        }
    }
}

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: String,
    pub dependencies: BTreeMap<String, HealthDependencyResponse>,
}

impl From<ApplicationHealth> for HealthResponse {
    fn from(value: ApplicationHealth) -> Self {
        let status = if value.is_healthy() { "ok" } else { "degraded" };

        Self {
            status: status.to_owned(),
            dependencies: value
                .dependencies
                .into_iter()
                .map(|(name, health)| (name, HealthDependencyResponse::from(health)))
                .collect(),
        }
    }
}
