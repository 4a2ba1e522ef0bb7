//! CLI host for the Tecnocall connector
//!
//! A stand-in for a workflow engine: reads a batch request from a JSON file
//! (or stdin), loads credentials from the environment, runs the batch, and
//! prints one output record per line.

use std::fs;
use std::io::Read;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;

use tecnocall_connector::{
    format_connector_error, route, BatchExecution, Credentials, HttpClient,
};

#[derive(Parser)]
#[command(
    name = "tecnocall-connector",
    about = "Run Tecnocall bot-API operations from a batch request file"
)]
struct Cli {
    /// Batch request JSON file, or "-" for stdin
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Override the base URL from TECNOCALL_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    /// Convert per-item failures into error records instead of aborting
    #[arg(long)]
    continue_on_fail: bool,

    /// Probe the credential against /api/bot/me and exit
    #[arg(long)]
    check_credentials: bool,
}

/// Batch request format: the resource/operation pair applies to the whole
/// batch; `items` holds optional per-item parameter overrides.
#[derive(Debug, Deserialize)]
struct BatchRequest {
    resource: String,
    operation: String,
    #[serde(default)]
    parameters: Map<String, Value>,
    #[serde(default)]
    items: Vec<Map<String, Value>>,
    #[serde(default)]
    continue_on_fail: bool,
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read request from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read {}", input))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut credentials = Credentials::from_env()?;
    if let Some(base_url) = cli.base_url {
        credentials.base_url = base_url;
    }
    let client = HttpClient::new(credentials);

    if cli.check_credentials {
        match client.verify_credentials().await {
            Ok(identity) => {
                println!("{}", identity);
                return Ok(());
            }
            Err(err) => bail!("{}", format_connector_error(&err)),
        }
    }

    let raw = read_input(&cli.input)?;
    let request: BatchRequest =
        serde_json::from_str(&raw).context("invalid batch request JSON")?;

    let execution = BatchExecution::with_items(request.parameters, request.items)
        .with_continue_on_fail(request.continue_on_fail || cli.continue_on_fail);

    match route(&client, &execution, &request.resource, &request.operation).await {
        Ok(records) => {
            for record in records {
                println!("{}", serde_json::to_string(&record)?);
            }
            Ok(())
        }
        Err(err) => bail!("{}", format_connector_error(&err)),
    }
}
