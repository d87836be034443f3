// ABOUTME: jobstat entry point
// ABOUTME: Parses arguments, sets up logging, runs the pipeline and maps errors to exit codes

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use jobstat::cli::Args;
use jobstat::config::{CliConfig, QueryConfig};
use jobstat::error::{JobstatError, EXIT_FATAL};
use jobstat::pipeline;
use jobstat::remote::RemoteClient;
use jobstat::session::ProfileSession;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<i32> {
    let mut config = CliConfig::load_or_default(&args.config).await?;
    if let Some(endpoint) = &args.endpoint {
        config.service.endpoint = endpoint.clone();
    }
    debug!("Using job directory at {}", config.service.endpoint);

    let session = ProfileSession::from_config(&config);
    let query = QueryConfig::from_args(&args, &session)?;
    debug!("Rendering as {} sorted by {}", query.display.format, query.display.sort_key);
    let client = RemoteClient::new(config.service.endpoint.clone(), config.service.timeout())?;

    let report = pipeline::run(&client, &session, &query, Utc::now()).await?;

    print!("{}", report.output);
    if !report.output.ends_with('\n') {
        println!();
    }
    for error in &report.errors {
        eprintln!("Error: {}", error);
    }
    debug!("Displayed {} job(s)", report.shown);

    Ok(report.exit_code())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.downcast_ref::<JobstatError>()
                .map(JobstatError::exit_code)
                .unwrap_or(EXIT_FATAL)
        }
    };

    std::process::exit(code);
}
