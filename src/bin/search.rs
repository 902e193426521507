//! Command-line entry point: run one federated search and print JSON.
//!
//! All tracing output goes to stderr so that stdout carries only the
//! JSON envelope.

use std::path::PathBuf;

use wprdc::{AppConfig, Searcher};

const USAGE: &str = "usage: wprdc-search [--config PATH] <query...>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("wprdc=info,wprdc_search=info")
            }),
        )
        .init();

    let Some(args) = parse_args(std::env::args().skip(1))? else {
        println!("{USAGE}");
        return Ok(());
    };

    let config = AppConfig::load(args.config.as_deref())?;
    let searcher = Searcher::new(&config)?;

    let response = searcher.search(&args.query).await.map_err(|e| {
        tracing::error!(error = %e, "search failed");
        anyhow::anyhow!("wprdc-search failed: {e}")
    })?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Parsed command-line arguments.
#[derive(Debug, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    query: String,
}

/// Parse arguments; `Ok(None)` means help was requested.
fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Option<Args>> {
    let mut config = None;
    let mut words: Vec<String> = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-c" | "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a path\n{USAGE}"))?;
                config = Some(PathBuf::from(path));
            }
            _ => words.push(arg),
        }
    }

    let query = words.join(" ");
    if query.trim().is_empty() {
        anyhow::bail!("missing query\n{USAGE}");
    }
    Ok(Some(Args { config, query }))
}
