// sheet_fetcher.rs
use crate::remote::FetchError;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const USER_AGENT: &str = concat!("prop-pulse/", env!("CARGO_PKG_VERSION"));

/// A downloaded sheet plus the hints needed to pick a decoder.
#[derive(Debug)]
pub struct FetchedSheet {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    /// Last path segment of the URL, e.g. `export.csv`.
    pub filename: Option<String>,
}

/// Downloads published spreadsheets (Google Sheets "publish to web" CSV links and the like).
pub struct SheetFetcher {
    client: Client,
}

impl SheetFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Only absolute http(s) URLs are accepted.
    pub fn parse_url(raw: &str) -> Result<Url, FetchError> {
        let url = Url::parse(raw.trim()).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(FetchError::UnsupportedScheme(other.to_string())),
        }
    }

    pub fn fetch(&self, raw_url: &str) -> Result<FetchedSheet, FetchError> {
        let url = Self::parse_url(raw_url)?;
        debug!(%url, "fetching remote sheet");

        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = resp
            .bytes()
            .map_err(|e| FetchError::Network(e.to_string()))?
            .to_vec();

        info!(%url, bytes = bytes.len(), content_type = ?content_type, "remote sheet downloaded");

        Ok(FetchedSheet {
            bytes,
            content_type,
            filename: filename_from_url(&url),
        })
    }
}

fn filename_from_url(url: &Url) -> Option<String> {
    url.path_segments()?
        .filter(|s| !s.is_empty())
        .last()
        .map(str::to_string)
}
