// ABOUTME: Wire types exchanged with the remote job directory service
// ABOUTME: Result envelope, selection filter, summary request and job identifier coercion

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{JobstatError, Result};

pub type JobId = u64;

/// One job's status summary: field name to value, in service order.
pub type JobSummary = serde_json::Map<String, Value>;

/// Summary payload as returned by the service, keyed by the job id in text form.
pub type RawSummaries = serde_json::Map<String, Value>;

pub const JOB_ID_FIELD: &str = "JobID";
pub const STATUS_FIELD: &str = "Status";

/// Message the service attaches to a non-ok selection that simply matched nothing.
pub const NO_JOBS_SELECTED: &str = "No jobs selected";

/// Result envelope used by every service call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    #[serde(rename = "OK")]
    pub ok: bool,
    #[serde(rename = "Value")]
    pub value: Option<T>,
    #[serde(rename = "Message", default)]
    pub message: String,
}

impl<T> ServiceResponse<T> {
    pub fn success(value: T) -> Self {
        Self {
            ok: true,
            value: Some(value),
            message: String::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            value: None,
            message: message.into(),
        }
    }

    /// Exact substring match on the free-text message; the service has no structured code for this.
    pub fn is_no_jobs_selected(&self) -> bool {
        !self.ok && self.message.contains(NO_JOBS_SELECTED)
    }
}

/// Selection constraints sent to `jobs/select`. Absent keys are not constrained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFilter {
    #[serde(rename = "Owner", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(rename = "Date")]
    pub since: DateTime<Utc>,
    #[serde(rename = "JobGroup", default, skip_serializing_if = "Option::is_none")]
    pub job_group: Option<String>,
    #[serde(rename = "JobName", default, skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryRequest<'a> {
    #[serde(rename = "JobIDs")]
    pub job_ids: &'a [JobId],
}

/// Coerce a raw identifier from the service (number or numeric string) to a `JobId`.
pub fn parse_job_id(raw: &Value) -> Result<JobId> {
    match raw {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| JobstatError::InvalidJobIdentifier(n.to_string())),
        Value::String(s) => parse_job_id_str(s),
        other => Err(JobstatError::InvalidJobIdentifier(other.to_string())),
    }
}

pub fn parse_job_id_str(raw: &str) -> Result<JobId> {
    raw.trim()
        .parse::<JobId>()
        .map_err(|_| JobstatError::InvalidJobIdentifier(format!("'{}'", raw)))
}
