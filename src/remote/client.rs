// ABOUTME: HTTP client for the remote job directory service
// ABOUTME: Handles job selection and batched summary requests over JSON

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::models::{JobFilter, JobId, RawSummaries, ServiceResponse, SummaryRequest};

/// The two calls the pipeline needs from the job directory service.
///
/// `Err` means the call itself could not be completed (transport, HTTP status,
/// undecodable body). A completed call that the service rejected comes back as
/// `Ok` with `ok == false`.
#[async_trait]
pub trait JobDirectory: Send + Sync {
    async fn select_jobs(&self, filter: &JobFilter) -> Result<ServiceResponse<Vec<Value>>>;

    async fn get_job_summaries(&self, job_ids: &[JobId]) -> Result<ServiceResponse<RawSummaries>>;
}

pub struct RemoteClient {
    client: Client,
    api_base_url: String,
}

impl RemoteClient {
    pub fn new(api_base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<ServiceResponse<T>>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach job directory service at {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Job directory service returned {}: {}", status, body);
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))
    }
}

#[async_trait]
impl JobDirectory for RemoteClient {
    async fn select_jobs(&self, filter: &JobFilter) -> Result<ServiceResponse<Vec<Value>>> {
        self.post("jobs/select", filter).await
    }

    async fn get_job_summaries(&self, job_ids: &[JobId]) -> Result<ServiceResponse<RawSummaries>> {
        self.post("jobs/summaries", &SummaryRequest { job_ids }).await
    }
}
