use claims_dashboard::app;
use claims_dashboard::config::Config;
use clap::Parser;

/// Main entry point for the dashboard server
///
/// Loads the claims spreadsheet named by `--data` (or `CLAIMS_DATA`) and serves
/// the dashboard on `--bind`. Logging goes through `env_logger`; set `RUST_LOG`
/// to change the default `info` level.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();

    // Start the web application with the loaded configuration
    app::run(config).await
}
