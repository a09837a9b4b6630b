//! CLI entry point for fetching artifacts from a tracking server.
//!
//! Provides subcommands that print an artifact as text, write its raw
//! bytes, or summarize the blob the server returned.

use anyhow::Result;
use artifact_fetch::config::{Config, parse_base_url};
use artifact_fetch::fetch::auth::DefaultHeaders;
use artifact_fetch::fetch::{
    BasicClient, fetch_artifact_blob, fetch_artifact_bytes, fetch_artifact_text,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "artifact-fetch")]
#[command(about = "Fetch artifacts from a tracking server over HTTP", long_about = None)]
struct Cli {
    /// Base URL for relative artifact locations (overrides ARTIFACT_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Cookie string to derive default request headers from (overrides ARTIFACT_COOKIE)
    #[arg(long, global = true)]
    cookie: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print an artifact decoded as text
    Text {
        #[arg(value_name = "LOCATION")]
        location: String,
    },
    /// Write an artifact's raw bytes to a file or stdout
    Bytes {
        #[arg(value_name = "LOCATION")]
        location: String,

        /// File to write to instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a JSON summary of the fetched blob
    Blob {
        #[arg(value_name = "LOCATION")]
        location: String,
    },
}

#[derive(Serialize)]
struct BlobSummary<'a> {
    location: &'a str,
    size: usize,
    content_type: Option<&'a str>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let _file_guard = init_tracing(&config.log_file_path);

    let base_url = match cli.base_url.as_deref() {
        Some(raw) => Some(parse_base_url(raw)?),
        None => config.base_url,
    };
    let cookie = cli.cookie.unwrap_or(config.cookie);

    let mut basic = BasicClient::new()?;
    if let Some(base_url) = base_url {
        basic = basic.with_base_url(base_url);
    }
    let client = DefaultHeaders::from_cookie(basic, &cookie);
    info!(default_headers = client.headers.len(), "Client ready");

    match cli.command {
        Commands::Text { location } => {
            let text = fetch_artifact_text(&client, &location).await?;
            print!("{text}");
        }
        Commands::Bytes { location, output } => {
            let bytes = fetch_artifact_bytes(&client, &location).await?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &bytes)?;
                    info!(path = %path.display(), bytes = bytes.len(), "Artifact written");
                }
                None => std::io::stdout().write_all(&bytes)?,
            }
        }
        Commands::Blob { location } => {
            let blob = fetch_artifact_blob(&client, &location)
                .await
                .inspect_err(|e| error!(error = %e, "Artifact fetch failed"))?;
            let summary = BlobSummary {
                location: &location,
                size: blob.size(),
                content_type: blob.content_type(),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_tracing(log_file_path: &str) -> tracing_appender::non_blocking::WorkerGuard {
    let log_dir = Path::new(log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("artifact_fetch.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", "info"));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", "debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    file_guard
}

fn env_filter(var: &str, default: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}
