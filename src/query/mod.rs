// ABOUTME: Job query stages: filter building, selection and batched summary fetching
// ABOUTME: Each stage completes before the next one starts

pub mod criteria;
pub mod fetch;
pub mod select;
pub mod table;

#[cfg(test)]
pub(crate) mod fake;

pub use criteria::{build_filter, SelectionCriteria};
pub use fetch::{fetch_summaries, partition, FetchOutcome, SUMMARY_CHUNK_SIZE};
pub use select::{select_group_jobs, select_jobs, GroupSelection};
pub use table::SummaryTable;
