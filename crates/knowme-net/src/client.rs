//! HTTP client for the data proxies.
//!
//! Failures are split in two: [`KnowmeError::Network`] when the proxy could
//! not be reached at all, [`KnowmeError::Proxy`] when it answered with a
//! non-2xx status or a payload that does not validate.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use knowme_types::config::ProxyConfig;
use knowme_types::error::{KnowmeError, Result};

use crate::SuggestionSource;
use crate::payload::{BookSuggestion, PhotoSuggestion};

/// reqwest-backed [`SuggestionSource`].
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    book_url: Url,
    photo_url: Url,
}

impl ProxyClient {
    /// Build a client for the endpoints described by `config`.
    pub fn new(config: &ProxyConfig) -> Result<Self> {
        let base = config.resolved_base();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("knowme/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| KnowmeError::Config(format!("http client: {e}")))?;
        let client = Self {
            http,
            book_url: endpoint(base, &config.book_path)?,
            photo_url: endpoint(base, &config.photo_path)?,
        };
        log::info!(
            "Proxy endpoints: book={} photo={}",
            client.book_url,
            client.photo_url
        );
        Ok(client)
    }

    pub fn book_url(&self) -> &Url {
        &self.book_url
    }

    pub fn photo_url(&self) -> &Url {
        &self.photo_url
    }

    async fn get(&self, url: &Url) -> Result<Vec<u8>> {
        log::debug!("GET {url}");
        let resp = self.http.get(url.clone()).send().await.map_err(classify)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(KnowmeError::Proxy(format!("{url} returned HTTP {status}")));
        }
        let body = resp.bytes().await.map_err(classify)?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl SuggestionSource for ProxyClient {
    async fn book(&self) -> Result<BookSuggestion> {
        let body = self.get(&self.book_url).await?;
        BookSuggestion::from_json(&body)
    }

    async fn photo(&self) -> Result<PhotoSuggestion> {
        let body = self.get(&self.photo_url).await?;
        PhotoSuggestion::from_json(&body)
    }
}

/// Join a base URL and an absolute path, keeping any path prefix on the base.
fn endpoint(base: &str, path: &str) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| KnowmeError::Config(format!("proxy url '{joined}': {e}")))
}

fn classify(e: reqwest::Error) -> KnowmeError {
    if e.is_connect() || e.is_timeout() {
        KnowmeError::Network(e.to_string())
    } else {
        KnowmeError::Proxy(e.to_string())
    }
}
