//! Retrieval tools used to ground generated resource lists in real search results.
//!
//! Tools never fail their caller: every error is logged and becomes an empty list,
//! so one broken provider cannot sink a whole request.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod video_id;
pub mod web_search;
pub mod youtube;

#[cfg(test)]
pub mod stub;

pub use web_search::GoogleArticleSearch;
pub use youtube::YoutubeSearch;

/// A playable video returned by video search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResource {
    pub title: String,
    pub channel: String,
    pub description: String,
    pub url: String,
    pub video_id: String,
}

/// An article returned by web search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleResource {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("missing credential: {0}")]
    MissingCredentials(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Embeddable videos matching `query`; empty on any failure.
    async fn search_videos(&self, query: &str) -> Vec<VideoResource>;
}

#[async_trait]
pub trait ArticleSearch: Send + Sync {
    /// Articles with confirmed URLs matching `query`; empty on any failure.
    async fn search_articles(&self, query: &str) -> Vec<ArticleResource>;
}

/// Decodes the handful of HTML entities search APIs leave in titles and snippets.
pub fn decode_html_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Turns a non-success response into `RetrievalError::Api`.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RetrievalError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(RetrievalError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_html_entities() {
        assert_eq!(
            decode_html_entities("Python for Beginners &amp; Kids &#39;24 &quot;Full&quot;"),
            "Python for Beginners & Kids '24 \"Full\""
        );
    }

    #[test]
    fn test_decode_keeps_double_escaped_amp_literal() {
        assert_eq!(decode_html_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_video_wire_format_is_camel_case() {
        let video = VideoResource {
            title: "t".into(),
            channel: "c".into(),
            description: "d".into(),
            url: "https://www.youtube.com/watch?v=abc".into(),
            video_id: "abc".into(),
        };
        let json = serde_json::to_value(&video).unwrap();
        assert_eq!(json["videoId"], "abc");
    }

    #[test]
    fn test_article_without_description_omits_field() {
        let article = ArticleResource {
            title: "t".into(),
            url: "https://example.org".into(),
            description: None,
        };
        let json = serde_json::to_value(&article).unwrap();
        assert!(json.get("description").is_none());
    }
}
