// ABOUTME: Drives one query run: filter, select, fetch, status filter, render
// ABOUTME: Selection and fetch failures are collected; identity and id errors abort

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::QueryConfig;
use crate::error::{JobstatError, Result, EXIT_REMOTE_FAILURE, EXIT_SUCCESS};
use crate::output::render;
use crate::query::{
    build_filter, fetch_summaries, select_group_jobs, select_jobs, SUMMARY_CHUNK_SIZE,
};
use crate::remote::JobDirectory;
use crate::session::Session;
use crate::status::filter_by_status;

#[derive(Debug)]
pub struct Report {
    /// Rendered table, possibly built from partial data.
    pub output: String,
    /// Number of jobs in the rendered table.
    pub shown: usize,
    /// Recoverable failures, in the order they happened.
    pub errors: Vec<JobstatError>,
}

impl Report {
    pub fn exit_code(&self) -> i32 {
        if self.errors.is_empty() {
            EXIT_SUCCESS
        } else {
            EXIT_REMOTE_FAILURE
        }
    }
}

pub async fn run(
    directory: &dyn JobDirectory,
    session: &dyn Session,
    config: &QueryConfig,
    now: DateTime<Utc>,
) -> Result<Report> {
    let mut errors = Vec::new();

    let filter = build_filter(&config.criteria, session, now)?;
    let mut job_ids = match select_jobs(directory, &filter).await {
        Ok(job_ids) => job_ids,
        Err(e) if e.is_recoverable() => {
            warn!("{}", e);
            errors.push(e);
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    let groups = select_group_jobs(directory, &config.include_groups, now).await?;
    job_ids.extend(groups.job_ids);
    errors.extend(groups.errors);
    job_ids.extend_from_slice(&config.job_ids);

    info!("Fetching summaries for {} job id(s)", job_ids.len());
    let outcome = fetch_summaries(directory, &job_ids, SUMMARY_CHUNK_SIZE).await;
    if !outcome.is_complete() {
        warn!(
            "{} summary chunk(s) failed, rendering partial results",
            outcome.failures.len()
        );
    }
    errors.extend(outcome.failures);

    let table = filter_by_status(outcome.table, &config.display.status_filter);
    let output = render(&table, &config.display);

    Ok(Report {
        output,
        shown: table.len(),
        errors,
    })
}
