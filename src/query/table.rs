// ABOUTME: Summary table keyed by job id
// ABOUTME: Merging overwrites by key so a job appears at most once

use serde_json::Value;
use std::collections::btree_map::{self, BTreeMap};

use crate::remote::models::{parse_job_id, JobId, JobSummary, RawSummaries, JOB_ID_FIELD};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryTable {
    records: BTreeMap<JobId, JobSummary>,
}

impl SummaryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, job_id: JobId) -> Option<&JobSummary> {
        self.records.get(&job_id)
    }

    pub fn insert(&mut self, job_id: JobId, record: JobSummary) -> Option<JobSummary> {
        self.records.insert(job_id, record)
    }

    pub fn job_ids(&self) -> Vec<JobId> {
        self.records.keys().copied().collect()
    }

    /// Records in ascending job id order.
    pub fn iter(&self) -> btree_map::Iter<'_, JobId, JobSummary> {
        self.records.iter()
    }

    /// Merge one chunk of raw summaries, normalizing each record's `JobID` to an integer.
    ///
    /// The whole chunk is rejected, leaving the table untouched, if any record cannot be
    /// keyed. Later merges overwrite earlier records for the same job.
    pub fn merge(&mut self, raw: RawSummaries) -> Result<usize, String> {
        let mut keyed = Vec::with_capacity(raw.len());
        for (key, value) in raw {
            let Value::Object(mut record) = value else {
                return Err(format!("summary for job {} is not an object", key));
            };
            let job_id = match record.get(JOB_ID_FIELD) {
                Some(field) => parse_job_id(field),
                None => parse_job_id(&Value::String(key.clone())),
            }
            .map_err(|e| format!("summary for job {}: {}", key, e))?;

            record.insert(JOB_ID_FIELD.to_string(), Value::from(job_id));
            keyed.push((job_id, record));
        }

        let merged = keyed.len();
        self.records.extend(keyed);
        Ok(merged)
    }
}

impl FromIterator<(JobId, JobSummary)> for SummaryTable {
    fn from_iter<I: IntoIterator<Item = (JobId, JobSummary)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SummaryTable {
    type Item = (JobId, JobSummary);
    type IntoIter = btree_map::IntoIter<JobId, JobSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a SummaryTable {
    type Item = (&'a JobId, &'a JobSummary);
    type IntoIter = btree_map::Iter<'a, JobId, JobSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
