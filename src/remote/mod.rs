mod fetch_error;
mod sheet_fetcher;

pub use fetch_error::FetchError;
pub use sheet_fetcher::{FetchedSheet, SheetFetcher};
