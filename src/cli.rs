// src/cli.rs

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, bail};
use tracing::info;

use crate::core::client::StripeClient;
use crate::core::probe::run_full_scan;
use crate::report;

/// Renderings available for a finished scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Console,
    Json,
    Html,
}

#[derive(Debug, Parser)]
#[command(
    name = "stripe-audit",
    version,
    about = "Scan your Stripe integration for security risks and best practice violations"
)]
pub struct Cli {
    /// Stripe secret key. Falls back to the STRIPE_SECRET_KEY environment
    /// variable.
    #[arg(short, long, env = "STRIPE_SECRET_KEY", hide_env_values = true)]
    pub key: String,

    /// Report format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Console)]
    pub output: OutputFormat,

    /// Output file path (for json/html formats).
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Parses arguments, runs the scan, renders the report, and chooses the
/// exit code: 0 for a scan without high severity issues, 1 otherwise.
/// Configuration failures abort before any probe runs.
pub async fn run() -> Result<i32> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if !cli.key.starts_with("sk_") {
        bail!("invalid Stripe secret key format: must start with sk_test_ or sk_live_");
    }

    info!(output = ?cli.output, "Scanning Stripe integration.");
    let client = StripeClient::new(cli.key.clone())?;
    let scan = run_full_scan(&client).await;

    match cli.output {
        OutputFormat::Console => print!("{}", report::render_console(&scan)),
        OutputFormat::Json => {
            write_or_print(cli.file.as_deref(), &report::render_json(&scan)?)?;
        }
        OutputFormat::Html => {
            // HTML always lands in a file, like the hosted report it mimics.
            let path = cli
                .file
                .clone()
                .unwrap_or_else(|| PathBuf::from("stripe-audit-report.html"));
            std::fs::write(&path, report::render_html(&scan))?;
            println!("Report saved to: {}", path.display());
        }
    }

    Ok(if scan.risk_score.high > 0 { 1 } else { 0 })
}

fn write_or_print(path: Option<&Path>, rendered: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, rendered)?;
            println!("Report saved to: {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
