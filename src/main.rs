mod client;
mod collections;
mod config;
mod confirm;
mod error;
mod scan;
mod sink;
mod workflow;

use std::io::{self, BufRead, Write};

use clap::{Args, Parser, Subcommand};

use client::{CmsClient, RemoteCollectionClient};
use client::cms::BuildError;
use collections::{CollectionSpec, default_collections};
use config::{ClientConfig, ClientTimeouts, ConfigError};
use sink::{ConsoleSink, ProgressSink, TracingSink};
use workflow::{BatchClearWorkflow, RunStatus, WorkflowError, WorkflowSummary};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    ClientBuild(#[from] BuildError),
    #[error("confirmation prompt failed: {0}")]
    Prompt(#[from] io::Error),
    #[error("sweep cancelled; nothing was deleted")]
    Declined,
    #[error("{0}")]
    Workflow(#[from] WorkflowError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("sweep did not fully succeed")]
    Unsuccessful,
    #[error("scan failed for {failed} of {total} collections")]
    ScanIncomplete { failed: usize, total: usize },
}

#[derive(Parser, Debug)]
#[command(name = "collection-sweeper", about = "Bulk-delete every record of the configured CMS object collections")]
struct Cli {
    #[arg(long, env = "SWEEPER_BASE_URL", default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "SWEEPER_SESSION_COOKIE", help = "Cookie header of an existing CMS session")]
    session_cookie: Option<String>,

    #[arg(long, env = "SWEEPER_REQUEST_TIMEOUT_SECS", default_value_t = config::DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,

    #[arg(long, env = "SWEEPER_CONNECT_TIMEOUT_SECS", default_value_t = config::DEFAULT_CONNECT_TIMEOUT_SECS)]
    connect_timeout_secs: u64,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the configured collections in clearing order.
    Collections,
    /// Count records per collection without deleting anything.
    Scan {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Delete every record of every configured collection.
    Clear(ClearArgs),
}

#[derive(Args, Debug)]
struct ClearArgs {
    #[arg(long, short = 'y', default_value_t = false, help = "Skip both confirmation prompts")]
    yes: bool,

    #[arg(long, default_value_t = false, help = "Print the run summary as JSON on stdout")]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // A missing .env is normal; flags and the real environment still apply.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let collections = default_collections();
    match cli.command {
        Command::Collections => {
            print_collections(&collections);
            Ok(())
        }
        Command::Scan { json } => {
            let config = client_config(&cli.base_url, cli.session_cookie, cli.request_timeout_secs, cli.connect_timeout_secs)?;
            run_scan(&config, &collections, json).await
        }
        Command::Clear(args) => {
            let config = client_config(&cli.base_url, cli.session_cookie, cli.request_timeout_secs, cli.connect_timeout_secs)?;
            run_clear(&config, collections, args, cli.verbose).await
        }
    }
}

fn client_config(
    base_url: &str,
    session_cookie: Option<String>,
    request_secs: u64,
    connect_secs: u64,
) -> Result<ClientConfig, ConfigError> {
    ClientConfig::new(base_url, session_cookie, ClientTimeouts { request_secs, connect_secs })
}

fn print_collections(collections: &[CollectionSpec]) {
    for (index, collection) in collections.iter().enumerate() {
        println!("{}. {} [{}] {}", index + 1, collection.label, collection.name, collection.endpoint);
    }
}

async fn run_scan(config: &ClientConfig, collections: &[CollectionSpec], json: bool) -> Result<(), CliError> {
    let client = CmsClient::new(config)?;
    let entries = scan::scan_collections(&client, collections).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in &entries {
            match (entry.count, &entry.message) {
                (Some(count), _) => println!("{:<16} {count}", entry.name),
                (None, Some(message)) => println!("{:<16} error: {message}", entry.name),
                (None, None) => println!("{:<16} error", entry.name),
            }
        }
    }

    let failed = entries.iter().filter(|e| !e.is_ok()).count();
    if failed > 0 {
        return Err(CliError::ScanIncomplete { failed, total: entries.len() });
    }
    Ok(())
}

async fn run_clear(
    config: &ClientConfig,
    collections: Vec<CollectionSpec>,
    args: ClearArgs,
    verbose: bool,
) -> Result<(), CliError> {
    let client = CmsClient::new(config)?;
    let sink = operator_sink(verbose);
    let summary = confirm_and_clear(
        &mut io::stdin().lock(),
        &mut io::stderr(),
        &client,
        &sink,
        collections,
        &config.base_url,
        args.yes,
    )
    .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary.report())?);
    }
    ensure_succeeded(&summary)
}

/// Console lines always; structured sink events only with `--verbose`, since
/// the fmt subscriber shares stderr with the console.
fn operator_sink(verbose: bool) -> (ConsoleSink<io::Stderr>, Option<TracingSink>) {
    (ConsoleSink::stderr(), verbose.then_some(TracingSink))
}

/// Ask for confirmation (unless `skip_confirm`), then sweep. No request is
/// sent when the operator declines.
async fn confirm_and_clear<R: BufRead, W: Write>(
    input: &mut R,
    prompt_out: &mut W,
    client: &dyn RemoteCollectionClient,
    sink: &dyn ProgressSink,
    collections: Vec<CollectionSpec>,
    base_url: &str,
    skip_confirm: bool,
) -> Result<WorkflowSummary, CliError> {
    if !skip_confirm && !confirm::confirm_twice(input, prompt_out, &collections, base_url)? {
        return Err(CliError::Declined);
    }

    let workflow = BatchClearWorkflow::new(collections);
    Ok(workflow.run(client, sink).await?)
}

/// The headline was already shown by the console sink; only the exit status
/// is left to report.
fn ensure_succeeded(summary: &WorkflowSummary) -> Result<(), CliError> {
    match summary.status() {
        RunStatus::Succeeded => Ok(()),
        RunStatus::PartiallyFailed | RunStatus::Failed => Err(CliError::Unsuccessful),
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
