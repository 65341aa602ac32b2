// config.rs
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// Command-line arguments, each also settable through the environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "prop_pulse")]
#[command(about = "Real-estate CRM backend with spreadsheet import")]
#[command(version)]
pub struct Config {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000", env = "PROP_PULSE_BIND")]
    pub bind: SocketAddr,

    /// SQLite database file
    #[arg(long, default_value = "prop_pulse.sqlite3", env = "PROP_PULSE_DB")]
    pub db_path: String,

    /// Schema applied at startup
    #[arg(long, default_value = "sql/schema.sql", env = "PROP_PULSE_SCHEMA")]
    pub schema: String,

    /// Request worker threads
    #[arg(long, default_value_t = 8, env = "PROP_PULSE_WORKERS")]
    pub workers: usize,

    /// Timeout for fetching remote sheets, in seconds
    #[arg(long, default_value_t = 30, env = "PROP_PULSE_FETCH_TIMEOUT")]
    pub fetch_timeout_secs: u64,
}

impl Config {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
