// ABOUTME: Profile file loading and the immutable per-run query configuration
// ABOUTME: Merges command-line arguments with saved session preferences exactly once

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::debug;

use crate::cli::Args;
use crate::error::JobstatError;
use crate::output::{DisplaySpec, OutputFormat, DEFAULT_DISPLAY_COLUMNS};
use crate::query::SelectionCriteria;
use crate::remote::models::{parse_job_id_str, JobId};
use crate::session::{Session, FIELDS_PREFERENCE};
use crate::status::StatusFilter;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub service: ServiceConfig,
    pub session: SessionConfig,
    pub preferences: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub user: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl CliConfig {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        Ok(config)
    }

    /// A missing file yields defaults; an unreadable or malformed one is an error.
    pub async fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !fs::try_exists(&path).await.unwrap_or(false) {
            debug!("No config file at {}, using defaults", path.as_ref().display());
            return Ok(Self::default());
        }
        Self::load(path).await
    }
}

/// Everything one run needs, built once from arguments and preferences and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    pub criteria: SelectionCriteria,
    /// Groups queried on their own, regardless of owner and name.
    pub include_groups: Vec<String>,
    /// Identifiers named directly on the command line.
    pub job_ids: Vec<JobId>,
    pub display: DisplaySpec,
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl QueryConfig {
    pub fn from_args(args: &Args, session: &dyn Session) -> crate::error::Result<Self> {
        let format: OutputFormat = args.fmt.parse()?;

        // explicit --fields > saved preference > built-in default
        let fields = match &args.fields {
            Some(fields) => split_list(fields),
            None => {
                let saved = split_list(&session.preference(FIELDS_PREFERENCE, ""));
                if saved.is_empty() {
                    DEFAULT_DISPLAY_COLUMNS.iter().map(|c| c.to_string()).collect()
                } else {
                    saved
                }
            }
        };

        let status_filter = if args.status_all {
            StatusFilter::All
        } else {
            match &args.status {
                Some(list) => StatusFilter::parse(list),
                None => StatusFilter::default(),
            }
        };

        let sort_key = args.sort.trim();
        if sort_key.is_empty() {
            return Err(JobstatError::Config("sort key must not be empty".to_string()));
        }

        let job_ids = args
            .job_ids
            .iter()
            .map(|raw| parse_job_id_str(raw))
            .collect::<crate::error::Result<Vec<_>>>()?;

        let config = Self {
            criteria: SelectionCriteria {
                owner: args.user.clone(),
                job_age_days: args.job_date,
                job_group: args.job_group.clone(),
                job_name: args.job_name.clone(),
            },
            include_groups: args
                .include_groups
                .iter()
                .map(|g| g.trim().to_string())
                .filter(|g| !g.is_empty())
                .collect(),
            job_ids,
            display: DisplaySpec::new(fields.as_slice(), format, sort_key, status_filter),
        };

        debug!("Query configuration: {:?}", config);
        Ok(config)
    }
}
