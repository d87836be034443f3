// ABOUTME: Resolves selection filters into job identifiers via the job directory
// ABOUTME: Distinguishes "nothing matched" from a failed query

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::criteria::group_filter;
use crate::error::{JobstatError, Result};
use crate::remote::models::{parse_job_id, JobFilter, JobId};
use crate::remote::JobDirectory;

pub async fn select_jobs(directory: &dyn JobDirectory, filter: &JobFilter) -> Result<Vec<JobId>> {
    let response = directory
        .select_jobs(filter)
        .await
        .map_err(|e| JobstatError::RemoteQuery(format!("{:#}", e)))?;

    if !response.ok {
        if response.is_no_jobs_selected() {
            info!("No jobs matched {:?}", filter);
            return Ok(Vec::new());
        }
        return Err(JobstatError::RemoteQuery(response.message));
    }

    let job_ids = response
        .value
        .unwrap_or_default()
        .iter()
        .map(parse_job_id)
        .collect::<Result<Vec<_>>>()?;

    debug!("Selected {} job(s)", job_ids.len());
    Ok(job_ids)
}

/// Identifiers gathered from several group queries, with the queries that failed.
#[derive(Debug, Default)]
pub struct GroupSelection {
    pub job_ids: Vec<JobId>,
    pub errors: Vec<JobstatError>,
}

/// Query each group on its own and union the results in order.
///
/// A failed group query is collected and the remaining groups are still queried.
/// A non-integer identifier aborts immediately.
pub async fn select_group_jobs(
    directory: &dyn JobDirectory,
    groups: &[String],
    now: DateTime<Utc>,
) -> Result<GroupSelection> {
    let mut selection = GroupSelection::default();

    for group in groups {
        match select_jobs(directory, &group_filter(group, now)?).await {
            Ok(job_ids) => {
                debug!("Group {} contributed {} job(s)", group, job_ids.len());
                selection.job_ids.extend(job_ids);
            }
            Err(e) if e.is_recoverable() => {
                warn!("Group {} query failed: {}", group, e);
                selection.errors.push(e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(selection)
}
