use chrono::NaiveDate;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Command line and environment configuration for the dashboard server.
#[derive(Debug, Clone, Parser)]
#[command(name = "claims-dashboard", version, about = "Warranty claims dashboard")]
pub struct Config {
    /// Spreadsheet holding the claims (xlsx, xls, ods or csv)
    #[arg(long, env = "CLAIMS_DATA", default_value = "claims_data_for_streamlit.xlsx")]
    pub data: PathBuf,

    /// Address the HTTP server binds to
    #[arg(long, env = "CLAIMS_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Directory served under /static
    #[arg(long, env = "CLAIMS_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Reference date for claim ageing (YYYY-MM-DD); defaults to the local date
    #[arg(long, env = "CLAIMS_TODAY")]
    pub today: Option<NaiveDate>,
}
