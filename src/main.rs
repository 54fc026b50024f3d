use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use open_prs::config::loader;
use open_prs::github::SecretsExtension;
use open_prs::handler;
use open_prs::response::Response;

#[derive(Parser)]
#[command(
    name = "open-prs",
    version,
    about = "Aggregate open pull requests across repositories into one JSON payload"
)]
struct Cli {
    /// Path to config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (DEBUG, INFO, WARNING, ERROR). Overrides the config.
    #[arg(long)]
    log_level: Option<String>,

    /// Pretty-print the response JSON.
    #[arg(long)]
    pretty: bool,
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("serializing response")?;
    println!("{out}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = loader::load_config(cli.config.as_deref())?;
    open_prs::logging::init(cli.log_level.as_deref().unwrap_or(&config.log_level));

    tracing::info!("open-prs starting");

    let outcome = match SecretsExtension::from_env(&config.secrets) {
        Ok(secrets) => handler::handle(&config, &secrets).await,
        Err(e) => Err(e.into()),
    };

    match outcome {
        Ok(response) => print_json(&response, cli.pretty),
        Err(e) => {
            tracing::error!("invocation failed: {e}");
            print_json(&Response::internal_error(e.to_string()), cli.pretty)?;
            Err(anyhow::Error::new(e).context("invocation failed"))
        }
    }
}
