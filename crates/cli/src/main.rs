//! # DNS Proxy
//!
//! Startup entry point: loads the proxy configuration once and reports it.

mod bootstrap;

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "dns-proxy")]
#[command(version)]
#[command(about = "DNS proxy with static overrides and a TTL-bounded cache")]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short = 'c', long, default_value = "config.json")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,

    /// Validate cross-field invariants and fail on the first problem set
    #[arg(long)]
    check: bool,

    /// Print the loaded configuration as JSON on stdout
    #[arg(long)]
    print: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    bootstrap::init_logging(&cli.log_level);

    info!("DNS Proxy Starting...");

    let config = bootstrap::load_config(&cli.config, cli.check)?;

    if cli.check {
        info!("Configuration is valid");
    }

    if cli.print {
        println!("{}", serde_json::to_string_pretty(&config)?);
    }

    Ok(())
}
