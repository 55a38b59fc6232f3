use std::{collections::BTreeMap, time::Duration as StdDuration};

use chrono::{DateTime, TimeDelta, Utc};
use humantime::format_duration;

use crate::{
    constants::START_TIME,
    entities::health::{HealthReport, ProbeOutcome},
    errors::AppError,
    repositories::experience::ExperienceRepository,
};

pub const DEFAULT_RECENT_WINDOW_DAYS: i64 = 7;
pub const DEFAULT_RETENTION_DAYS: i64 = 365;
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// Runs the scheduled data-store probes and aggregates them into a report.
pub struct HealthCheckHandler<R>
where
    R: ExperienceRepository,
{
    pub experience_repo: R,
    recent_window_days: i64,
    retention_days: i64,
}

impl<R> HealthCheckHandler<R>
where
    R: ExperienceRepository,
{
    pub fn new(experience_repo: R, recent_window_days: i64, retention_days: i64) -> Self {
        HealthCheckHandler {
            experience_repo,
            recent_window_days,
            retention_days,
        }
    }

    /// Every probe runs even when an earlier one fails; a failure only marks
    /// its own entry.
    pub async fn run_checks(&self, now: DateTime<Utc>) -> HealthReport {
        let mut checks = BTreeMap::new();

        checks.insert(
            "connectivity".to_string(),
            outcome(self.experience_repo.check_connection().await.map(|_| None)),
        );
        checks.insert(
            "total_submissions".to_string(),
            outcome(self.experience_repo.count_experiences(None).await.map(Some)),
        );

        let recent = match days_before(now, self.recent_window_days) {
            Ok(since) => self.experience_repo.count_created_since(since).await.map(Some),
            Err(e) => Err(e),
        };
        checks.insert("recent_submissions".to_string(), outcome(recent));
        checks.insert(
            "incomplete_records".to_string(),
            outcome(self.experience_repo.count_incomplete_records().await.map(Some)),
        );

        let stale = match days_before(now, self.retention_days) {
            Ok(cutoff) => self.experience_repo.count_created_before(cutoff).await.map(Some),
            Err(e) => Err(e),
        };
        checks.insert("stale_records".to_string(), outcome(stale));

        let report = HealthReport::from_checks(checks, now.to_rfc3339(), uptime_since(*START_TIME, now));

        tracing::info!(status = ?report.status, checks = ?report.checks, "Database health check completed");
        if !report.failed_checks().is_empty() {
            tracing::error!(failed = ?report.failed_checks(), "Database health check found failing probes");
        }

        report
    }
}

fn outcome(result: Result<Option<i64>, AppError>) -> ProbeOutcome {
    match result {
        Ok(count) => ProbeOutcome::passed(count),
        Err(e) => ProbeOutcome::failed(e.detail()),
    }
}

fn days_before(now: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>, AppError> {
    TimeDelta::try_days(days)
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or_else(|| AppError::InternalError(format!("A {days}-day window is out of range")))
}

fn uptime_since(start: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(start).num_seconds().max(0) as u64;
    format_duration(StdDuration::from_secs(seconds)).to_string()
}
