//! JSON payloads returned by the data proxies.

use serde::{Deserialize, Deserializer};

use knowme_types::error::{KnowmeError, Result};

/// A random book from the reading shelf.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookSuggestion {
    pub title: String,
    #[serde(default)]
    pub author: String,
    /// Review text. Older proxy deployments call it `review`.
    #[serde(default, alias = "review", deserialize_with = "non_empty")]
    pub description: Option<String>,
    /// The proxy forwards the feed's rating verbatim, as a string or a number.
    #[serde(default, deserialize_with = "string_or_number")]
    pub rating: Option<String>,
    #[serde(default)]
    pub link: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub cover: Option<String>,
}

/// A random photo from the photo account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PhotoSuggestion {
    pub url: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub description: Option<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub link: String,
}

impl BookSuggestion {
    /// Decode and validate a proxy response body.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let book: Self = serde_json::from_slice(body)
            .map_err(|e| KnowmeError::Proxy(format!("malformed book payload: {e}")))?;
        if book.title.trim().is_empty() {
            return Err(KnowmeError::Proxy("book payload has empty title".to_string()));
        }
        Ok(book)
    }

    /// Output lines for the terminal.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![if self.author.is_empty() {
            format!("📚 {}", self.title)
        } else {
            format!("📚 {} by {}", self.title, self.author)
        }];
        if let Some(rating) = self.rating.as_deref().filter(|r| *r != "0") {
            lines.push(format!("Rating: {rating}/5"));
        }
        if let Some(desc) = &self.description {
            lines.push(desc.clone());
        }
        if !self.link.is_empty() {
            lines.push(format!("Link: {}", self.link));
        }
        if let Some(cover) = &self.cover {
            lines.push(format!("Cover: {cover}"));
        }
        lines
    }
}

impl PhotoSuggestion {
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let photo: Self = serde_json::from_slice(body)
            .map_err(|e| KnowmeError::Proxy(format!("malformed photo payload: {e}")))?;
        if photo.url.trim().is_empty() {
            return Err(KnowmeError::Proxy("photo payload has empty url".to_string()));
        }
        Ok(photo)
    }

    pub fn to_lines(&self) -> Vec<String> {
        let desc = self.description.as_deref().unwrap_or("Untitled");
        let mut lines = vec![if self.author.is_empty() {
            format!("📷 {desc}")
        } else {
            format!("📷 {desc} by {}", self.author)
        }];
        if !self.link.is_empty() {
            lines.push(format!("View: {}", self.link));
        }
        lines.push(format!("Image: {}", self.url));
        lines
    }
}

fn non_empty<'de, D>(de: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(de)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn string_or_number<'de, D>(de: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(de)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_full_payload() {
        let body = br#"{
            "title": "Flatland",
            "author": "Edwin Abbott Abbott",
            "description": "A romance of many dimensions.",
            "rating": "5",
            "link": "https://goodreads.com/review/1"
        }"#;
        let book = BookSuggestion::from_json(body).unwrap();
        assert_eq!(book.title, "Flatland");
        assert_eq!(book.rating.as_deref(), Some("5"));
        assert_eq!(
            book.to_lines(),
            vec![
                "📚 Flatland by Edwin Abbott Abbott",
                "Rating: 5/5",
                "A romance of many dimensions.",
                "Link: https://goodreads.com/review/1",
            ]
        );
    }

    #[test]
    fn book_review_alias_and_numeric_rating() {
        let body = br#"{"title": "Dune", "review": "Spice.", "rating": 4}"#;
        let book = BookSuggestion::from_json(body).unwrap();
        assert_eq!(book.description.as_deref(), Some("Spice."));
        assert_eq!(book.rating.as_deref(), Some("4"));
    }

    #[test]
    fn book_zero_rating_hidden() {
        let book = BookSuggestion::from_json(br#"{"title": "Dune", "rating": "0"}"#).unwrap();
        assert_eq!(book.to_lines(), vec!["📚 Dune"]);
    }

    #[test]
    fn book_cover_shown_last() {
        let body = br#"{"title": "Dune", "link": "https://gr/2", "cover": "https://img/dune.jpg"}"#;
        let book = BookSuggestion::from_json(body).unwrap();
        assert_eq!(
            book.to_lines(),
            vec!["📚 Dune", "Link: https://gr/2", "Cover: https://img/dune.jpg"]
        );
        let blank = BookSuggestion::from_json(br#"{"title": "Dune", "cover": ""}"#).unwrap();
        assert_eq!(blank.to_lines(), vec!["📚 Dune"]);
    }

    #[test]
    fn book_missing_title_is_proxy_error() {
        let err = BookSuggestion::from_json(br#"{"author": "Nobody"}"#).unwrap_err();
        assert!(matches!(err, KnowmeError::Proxy(_)));
    }

    #[test]
    fn book_blank_title_is_proxy_error() {
        let err = BookSuggestion::from_json(br#"{"title": "  "}"#).unwrap_err();
        assert!(matches!(err, KnowmeError::Proxy(_)));
    }

    #[test]
    fn book_not_json_is_proxy_error() {
        let err = BookSuggestion::from_json(b"<html>oops</html>").unwrap_err();
        assert!(!err.is_unreachable());
    }

    #[test]
    fn photo_payload() {
        let body = br#"{
            "url": "https://images.example/1.jpg",
            "description": "",
            "author": "Adarsh",
            "link": "https://unsplash.com/photos/1"
        }"#;
        let photo = PhotoSuggestion::from_json(body).unwrap();
        assert!(photo.description.is_none());
        assert_eq!(
            photo.to_lines(),
            vec![
                "📷 Untitled by Adarsh",
                "View: https://unsplash.com/photos/1",
                "Image: https://images.example/1.jpg",
            ]
        );
    }

    #[test]
    fn photo_missing_url_is_proxy_error() {
        let err = PhotoSuggestion::from_json(br#"{"description": "sky"}"#).unwrap_err();
        assert!(matches!(err, KnowmeError::Proxy(_)));
    }
}
