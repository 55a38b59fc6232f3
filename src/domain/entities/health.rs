use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Passed,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeOutcome {
    pub status: ProbeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeOutcome {
    pub fn passed(count: Option<i64>) -> Self {
        ProbeOutcome { status: ProbeStatus::Passed, count, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        ProbeOutcome { status: ProbeStatus::Failed, count: None, error: Some(error.into()) }
    }

    pub fn is_failed(&self) -> bool {
        self.status == ProbeStatus::Failed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallHealth {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub success: bool,
    pub status: OverallHealth,
    pub timestamp: String,
    pub version: String,
    pub uptime: String,
    pub checks: BTreeMap<String, ProbeOutcome>,
}

impl HealthReport {
    /// Aggregates probe outcomes: any failed probe makes the report unhealthy.
    pub fn from_checks(
        checks: BTreeMap<String, ProbeOutcome>,
        timestamp: String,
        uptime: String,
    ) -> Self {
        let status = if checks.values().any(ProbeOutcome::is_failed) {
            OverallHealth::Unhealthy
        } else {
            OverallHealth::Healthy
        };

        HealthReport {
            success: true,
            status,
            timestamp,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime,
            checks,
        }
    }

    pub fn failed_checks(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|(_, outcome)| outcome.is_failed())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
