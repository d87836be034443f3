// ABOUTME: Turns user selection criteria into the filter sent to the job directory
// ABOUTME: Resolves the owner once and computes the submission cutoff

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::error::{JobstatError, Result};
use crate::remote::models::JobFilter;
use crate::session::Session;

pub const DEFAULT_JOB_AGE_DAYS: u32 = 10;

/// Window used for group-only queries.
pub const GROUP_JOB_AGE_DAYS: u32 = 30;

/// Owner tokens meaning "jobs of every user", compared case-insensitively.
pub const ALL_OWNERS: [&str; 2] = ["*", "__all__"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCriteria {
    pub owner: Option<String>,
    pub job_age_days: u32,
    pub job_group: Option<String>,
    pub job_name: Option<String>,
}

impl Default for SelectionCriteria {
    fn default() -> Self {
        Self {
            owner: None,
            job_age_days: DEFAULT_JOB_AGE_DAYS,
            job_group: None,
            job_name: None,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// `None` owner resolves to the session user; a wildcard drops the owner constraint.
pub fn resolve_owner(owner: Option<&str>, session: &dyn Session) -> Result<Option<String>> {
    match non_empty(owner) {
        None => session.current_user_name().map(Some),
        Some(owner)
            if ALL_OWNERS
                .iter()
                .any(|token| owner.eq_ignore_ascii_case(token)) =>
        {
            Ok(None)
        }
        Some(owner) => Ok(Some(owner)),
    }
}

/// `now` minus `days`; an age reaching past the representable date range is a config error.
pub fn cutoff(now: DateTime<Utc>, days: u32) -> Result<DateTime<Utc>> {
    now.checked_sub_signed(Duration::days(i64::from(days)))
        .ok_or_else(|| JobstatError::Config(format!("job age of {} days is out of range", days)))
}

pub fn build_filter(
    criteria: &SelectionCriteria,
    session: &dyn Session,
    now: DateTime<Utc>,
) -> Result<JobFilter> {
    let owner = resolve_owner(criteria.owner.as_deref(), session)?;
    let filter = JobFilter {
        owner,
        since: cutoff(now, criteria.job_age_days)?,
        job_group: non_empty(criteria.job_group.as_deref()),
        job_name: non_empty(criteria.job_name.as_deref()),
    };

    debug!("Selection filter: {:?}", filter);
    Ok(filter)
}

/// Filter for one job group regardless of owner or name.
pub fn group_filter(group: &str, now: DateTime<Utc>) -> Result<JobFilter> {
    Ok(JobFilter {
        owner: None,
        since: cutoff(now, GROUP_JOB_AGE_DAYS)?,
        job_group: Some(group.trim().to_string()),
        job_name: None,
    })
}
