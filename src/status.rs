// ABOUTME: Job lifecycle states and the status filter applied to fetched summaries
// ABOUTME: Matching is case-insensitive; the default hides jobs in a final state

use std::collections::BTreeSet;

use crate::query::SummaryTable;
use crate::remote::models::STATUS_FIELD;

pub const JOB_STATES: [&str; 10] = [
    "Received", "Checking", "Staging", "Waiting", "Matched", "Running", "Stalled", "Done",
    "Completed", "Failed",
];

/// States from which a job never transitions again.
pub const JOB_FINAL_STATES: [&str; 3] = ["Done", "Completed", "Failed"];

pub const ALL_STATUSES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    /// Lowercased status names to keep.
    Only(BTreeSet<String>),
}

impl Default for StatusFilter {
    /// Every known state that is not final, i.e. jobs still in flight.
    fn default() -> Self {
        let active = JOB_STATES
            .iter()
            .filter(|state| !JOB_FINAL_STATES.contains(state))
            .map(|state| state.to_lowercase())
            .collect();
        StatusFilter::Only(active)
    }
}

impl StatusFilter {
    /// Parse a comma separated list such as `Running,waiting`. `all` anywhere selects everything.
    pub fn parse(list: &str) -> Self {
        let statuses: BTreeSet<String> = list
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        if statuses.contains(ALL_STATUSES) {
            StatusFilter::All
        } else {
            StatusFilter::Only(statuses)
        }
    }

    pub fn matches(&self, status: &str) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(statuses) => statuses.contains(&status.to_lowercase()),
        }
    }
}

/// Keep the records whose `Status` passes `filter`. Records without a textual status are dropped
/// unless the filter is `All`.
pub fn filter_by_status(table: SummaryTable, filter: &StatusFilter) -> SummaryTable {
    if *filter == StatusFilter::All {
        return table;
    }

    table
        .into_iter()
        .filter(|(_, record)| {
            record
                .get(STATUS_FIELD)
                .and_then(|status| status.as_str())
                .is_some_and(|status| filter.matches(status))
        })
        .collect()
}
