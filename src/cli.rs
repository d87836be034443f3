// ABOUTME: Command-line surface of jobstat
// ABOUTME: Selection, display and connection flags plus positional job ids

use clap::Parser;

use crate::query::criteria::DEFAULT_JOB_AGE_DAYS;

#[derive(Parser, Debug, Clone)]
#[command(name = "jobstat")]
#[command(about = "Retrieve the status of jobs from the job directory service")]
#[command(version)]
pub struct Args {
    /// Job owner; `*` or `__all__` selects jobs of every user
    #[arg(short = 'u', long = "user")]
    pub user: Option<String>,

    /// Comma separated job statuses to display (`all` for any)
    #[arg(short = 'S', long = "status")]
    pub status: Option<String>,

    /// Display jobs of any status, including final ones
    #[arg(short = 'a', long = "status-all")]
    pub status_all: bool,

    /// Select jobs by job group
    #[arg(short = 'g', long = "job-group")]
    pub job_group: Option<String>,

    /// Select jobs by job name
    #[arg(short = 'n', long = "job-name")]
    pub job_name: Option<String>,

    /// Age of jobs to display, in days
    #[arg(short = 'D', long = "job-date", default_value_t = DEFAULT_JOB_AGE_DAYS)]
    pub job_date: u32,

    /// Also include every job of this group, whatever its owner (repeatable)
    #[arg(long = "include-group")]
    pub include_groups: Vec<String>,

    /// Display format (pretty, csv, json)
    #[arg(short = 'f', long = "fmt", default_value = "pretty")]
    pub fmt: String,

    /// Comma separated list of job fields to display
    #[arg(short = 'F', long = "fields")]
    pub fields: Option<String>,

    /// Field to sort the output by
    #[arg(long, default_value = "JobID")]
    pub sort: String,

    /// Profile file with service endpoint, session user and preferences
    #[arg(long, default_value = "jobstat.toml")]
    pub config: String,

    /// Job directory service endpoint, overriding the profile
    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(short, long)]
    pub verbose: bool,

    /// Job ids to display in addition to the selected ones
    #[arg(value_name = "JOB_ID")]
    pub job_ids: Vec<String>,
}
