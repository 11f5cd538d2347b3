//! Article search over the Google Custom Search JSON API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::generation::schema::is_http_url;
use crate::retrieval::{
    check_status, decode_html_entities, ArticleResource, ArticleSearch, RetrievalError,
};

const CUSTOM_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";
const NUM_RESULTS: u32 = 3;

#[derive(Debug, Deserialize)]
struct CustomSearchResponse {
    #[serde(default)]
    items: Vec<CustomSearchItem>,
}

#[derive(Debug, Deserialize)]
struct CustomSearchItem {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

#[derive(Clone)]
pub struct GoogleArticleSearch {
    client: Client,
    api_key: Option<String>,
    cx: Option<String>,
    endpoint: String,
}

impl GoogleArticleSearch {
    pub fn new(client: Client, api_key: Option<String>, cx: Option<String>) -> Self {
        Self {
            client,
            api_key,
            cx,
            endpoint: CUSTOM_SEARCH_URL.to_string(),
        }
    }

    /// Points the tool at a different endpoint.
    #[cfg(test)]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn try_search(&self, query: &str) -> Result<Vec<ArticleResource>, RetrievalError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(RetrievalError::MissingCredentials("GOOGLE_CUSTOM_SEARCH_API_KEY"))?;
        let cx = self
            .cx
            .as_deref()
            .ok_or(RetrievalError::MissingCredentials("GOOGLE_CUSTOM_SEARCH_CX"))?;

        let num = NUM_RESULTS.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("key", api_key), ("cx", cx), ("q", query), ("num", num.as_str())])
            .send()
            .await?;

        let body: CustomSearchResponse = check_status(response).await?.json().await?;
        Ok(articles_from_items(body.items))
    }
}

/// Keeps only items whose link is a real http(s) URL; no link means no article.
fn articles_from_items(items: Vec<CustomSearchItem>) -> Vec<ArticleResource> {
    items
        .into_iter()
        .filter_map(|item| {
            let url = item.link.map(|l| l.trim().to_string())?;
            if !is_http_url(&url) {
                return None;
            }
            Some(ArticleResource {
                title: item
                    .title
                    .map(|t| decode_html_entities(&t))
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| "No Title".to_string()),
                url,
                description: Some(
                    item.snippet
                        .map(|s| decode_html_entities(&s))
                        .unwrap_or_else(|| "No description available.".to_string()),
                ),
            })
        })
        .collect()
}

#[async_trait]
impl ArticleSearch for GoogleArticleSearch {
    async fn search_articles(&self, query: &str) -> Vec<ArticleResource> {
        match self.try_search(query).await {
            Ok(articles) => {
                debug!("Web search '{query}' returned {} articles", articles.len());
                articles
            }
            Err(e) => {
                error!("Web search failed for '{query}': {e}");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{extract::Query, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    use super::*;
    use crate::retrieval::stub::serve;

    fn api_response() -> Value {
        json!({
            "items": [
                {
                    "title": "The Python Tutorial &mdash; Python 3 documentation",
                    "link": "https://docs.python.org/3/tutorial/",
                    "snippet": "This tutorial introduces the reader informally..."
                },
                {"title": "No link here", "snippet": "dropped"},
                {"title": "Placeholder", "link": "example.com/article"},
                {"link": "https://realpython.com/python-basics/"}
            ]
        })
    }

    #[test]
    fn test_items_without_valid_link_are_dropped() {
        let body: CustomSearchResponse = serde_json::from_value(api_response()).unwrap();
        let articles = articles_from_items(body.items);

        assert_eq!(articles.len(), 2);
        assert!(articles.iter().all(|a| is_http_url(&a.url)));
    }

    #[test]
    fn test_defaults_for_missing_title_and_snippet() {
        let body: CustomSearchResponse = serde_json::from_value(api_response()).unwrap();
        let articles = articles_from_items(body.items);

        assert_eq!(articles[1].title, "No Title");
        assert_eq!(
            articles[1].description.as_deref(),
            Some("No description available.")
        );
    }

    #[tokio::test]
    async fn test_missing_cx_returns_empty() {
        let tool = GoogleArticleSearch::new(Client::new(), Some("key".to_string()), None);
        assert!(tool.search_articles("python").await.is_empty());
    }

    #[tokio::test]
    async fn test_search_requests_three_results() {
        let app = Router::new().route(
            "/v1",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params["num"], "3");
                assert_eq!(params["cx"], "engine");
                Json(api_response())
            }),
        );
        let base = serve(app).await;

        let tool = GoogleArticleSearch::new(
            Client::new(),
            Some("key".to_string()),
            Some("engine".to_string()),
        )
        .with_endpoint(format!("{base}/v1"));
        assert_eq!(tool.search_articles("python basics").await.len(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_returns_empty() {
        let tool = GoogleArticleSearch::new(
            Client::new(),
            Some("key".to_string()),
            Some("engine".to_string()),
        )
        .with_endpoint("http://127.0.0.1:9/unreachable");
        assert!(tool.search_articles("python basics").await.is_empty());
    }
}
