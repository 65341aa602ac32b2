use crate::config::Config;
use crate::db::connection::{init_db, Database};
use crate::remote::SheetFetcher;
use crate::responses::error_to_response;
use crate::router::{handle, AppState};
use astra::Server;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod domain;
mod errors;
mod importer;
mod remote;
mod responses;
mod router;
mod spreadsheets;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prop_pulse=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();

    // 1️⃣ Create the database handle and apply the schema
    let db = Database::new(config.db_path.clone());
    if let Err(e) = init_db(&db, &config.schema) {
        error!("Database initialization failed: {e}");
        std::process::exit(1);
    }

    // 2️⃣ Client for URL imports
    let fetcher = match SheetFetcher::new(config.fetch_timeout()) {
        Ok(f) => f,
        Err(e) => {
            error!("HTTP client setup failed: {e}");
            std::process::exit(1);
        }
    };

    let state = AppState { db, fetcher };

    // 3️⃣ Start the server
    info!(addr = %config.bind, workers = config.workers, "starting server");
    let server = Server::bind(&config.bind).max_workers(config.workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
    }

    info!("Server shut down cleanly.");
}
