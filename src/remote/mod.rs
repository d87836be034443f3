// ABOUTME: Remote job directory service access
// ABOUTME: Wire models plus the JobDirectory seam and its HTTP implementation

pub mod client;
pub mod models;

pub use client::{JobDirectory, RemoteClient};
pub use models::{JobFilter, JobId, JobSummary, RawSummaries, ServiceResponse};
