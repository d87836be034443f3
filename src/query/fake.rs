// ABOUTME: In-memory job directory used by unit tests
// ABOUTME: Records every call and can fail selected summary chunks

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use crate::remote::models::{JobFilter, JobId, RawSummaries, ServiceResponse};
use crate::remote::JobDirectory;

#[derive(Default)]
pub struct FakeDirectory {
    /// Selection response per job group (`None` for ungrouped queries).
    pub selections: HashMap<Option<String>, ServiceResponse<Vec<Value>>>,
    pub jobs: BTreeMap<JobId, Value>,
    /// Zero-based summary call indices that fail.
    pub failing_calls: HashSet<usize>,
    pub select_calls: Mutex<Vec<JobFilter>>,
    pub summary_calls: Mutex<Vec<Vec<JobId>>>,
}

impl FakeDirectory {
    pub fn with_jobs(jobs: &[(JobId, &str)]) -> Self {
        let mut directory = Self::default();
        for (id, status) in jobs {
            directory
                .jobs
                .insert(*id, json!({"JobID": id.to_string(), "Status": status}));
        }
        directory
    }

    pub fn summary_call_sizes(&self) -> Vec<usize> {
        self.summary_calls
            .lock()
            .unwrap()
            .iter()
            .map(Vec::len)
            .collect()
    }
}

#[async_trait]
impl JobDirectory for FakeDirectory {
    async fn select_jobs(&self, filter: &JobFilter) -> Result<ServiceResponse<Vec<Value>>> {
        self.select_calls.lock().unwrap().push(filter.clone());
        Ok(self
            .selections
            .get(&filter.job_group)
            .cloned()
            .unwrap_or_else(|| ServiceResponse::failure("No jobs selected")))
    }

    async fn get_job_summaries(&self, job_ids: &[JobId]) -> Result<ServiceResponse<RawSummaries>> {
        let call = {
            let mut calls = self.summary_calls.lock().unwrap();
            calls.push(job_ids.to_vec());
            calls.len() - 1
        };

        if self.failing_calls.contains(&call) {
            anyhow::bail!("summary call {} refused", call);
        }

        let summaries = job_ids
            .iter()
            .filter_map(|id| self.jobs.get(id).map(|record| (id.to_string(), record.clone())))
            .collect();
        Ok(ServiceResponse::success(summaries))
    }
}
