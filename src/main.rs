use anyhow::Context;
use bgw::cli::{commands, Cli};
use bgw::core::config::BgwConfig;
use bgw::exchanges::bgw::build_client;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    // stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config() -> anyhow::Result<BgwConfig> {
    #[cfg(feature = "env-file")]
    let config = BgwConfig::from_env_file();
    #[cfg(not(feature = "env-file"))]
    let config = BgwConfig::from_env();

    config.context("failed to load configuration")
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config()?;
    let client = build_client(config).context("failed to build HTTP client")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(&cli, &client, &mut out).await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
