//! Client side of the remote data proxies.
//!
//! Two commands (`booksuggestion`, `photosuggestion`) pull a random item
//! from a small serverless proxy. This crate resolves the endpoint, fetches
//! it, and validates the JSON payload. Commands depend on the
//! [`SuggestionSource`] trait so they can be exercised without a network.

pub mod client;
pub mod payload;

pub use client::ProxyClient;
pub use payload::{BookSuggestion, PhotoSuggestion};

use async_trait::async_trait;
use knowme_types::error::Result;

/// Something that can produce book and photo suggestions.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Fetch one random book from the reading shelf.
    async fn book(&self) -> Result<BookSuggestion>;

    /// Fetch one random photo from the photo account.
    async fn photo(&self) -> Result<PhotoSuggestion>;
}
