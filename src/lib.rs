// ABOUTME: jobstat library: query, fetch, filter and render job status summaries
// ABOUTME: The binary in main.rs wires these modules to the command line

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod query;
pub mod remote;
pub mod session;
pub mod status;
