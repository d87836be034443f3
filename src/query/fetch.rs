// ABOUTME: Fetches job summaries in bounded-size chunks and merges them into one table
// ABOUTME: A failed chunk is recorded and the remaining chunks are still fetched

use std::num::NonZeroUsize;
use tracing::{debug, warn};

use super::table::SummaryTable;
use crate::error::JobstatError;
use crate::remote::models::JobId;
use crate::remote::JobDirectory;

/// Largest id list sent in one summary request.
pub const SUMMARY_CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(1000) {
    Some(size) => size,
    None => panic!("chunk size must be non-zero"),
};

#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub table: SummaryTable,
    pub failures: Vec<JobstatError>,
}

impl FetchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Consecutive, non-overlapping chunks of at most `size` ids, in order.
pub fn partition(job_ids: &[JobId], size: NonZeroUsize) -> std::slice::Chunks<'_, JobId> {
    job_ids.chunks(size.get())
}

pub async fn fetch_summaries(
    directory: &dyn JobDirectory,
    job_ids: &[JobId],
    chunk_size: NonZeroUsize,
) -> FetchOutcome {
    let mut outcome = FetchOutcome::default();
    if job_ids.is_empty() {
        return outcome;
    }

    for (index, chunk) in partition(job_ids, chunk_size).enumerate() {
        debug!("Requesting summaries for chunk {} ({} jobs)", index, chunk.len());

        let result = match directory.get_job_summaries(chunk).await {
            Err(e) => Err(format!("{:#}", e)),
            Ok(response) if !response.ok => Err(response.message),
            Ok(response) => outcome.table.merge(response.value.unwrap_or_default()),
        };

        if let Err(message) = result {
            let failure = JobstatError::BatchFetch {
                chunk: index,
                size: chunk.len(),
                message,
            };
            warn!("{}", failure);
            outcome.failures.push(failure);
        }
    }

    debug!(
        "Fetched {} summaries, {} chunk(s) failed",
        outcome.table.len(),
        outcome.failures.len()
    );
    outcome
}
