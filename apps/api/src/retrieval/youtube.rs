//! Video search over the YouTube Data API v3 `search.list` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::retrieval::video_id::watch_url;
use crate::retrieval::{
    check_status, decode_html_entities, RetrievalError, VideoResource, VideoSearch,
};

const YOUTUBE_SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";
const MAX_RESULTS: u32 = 4;

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: Option<SearchItemId>,
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: Option<String>,
    description: Option<String>,
    channel_title: Option<String>,
}

#[derive(Clone)]
pub struct YoutubeSearch {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl YoutubeSearch {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            endpoint: YOUTUBE_SEARCH_URL.to_string(),
        }
    }

    /// Points the tool at a different `search` endpoint.
    #[cfg(test)]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn try_search(&self, query: &str) -> Result<Vec<VideoResource>, RetrievalError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(RetrievalError::MissingCredentials("YOUTUBE_API_KEY"))?;

        let max_results = MAX_RESULTS.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", api_key),
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("videoEmbeddable", "true"),
                ("videoSyndicated", "true"),
                ("maxResults", max_results.as_str()),
            ])
            .send()
            .await?;

        let body: SearchListResponse = check_status(response).await?.json().await?;
        Ok(videos_from_items(body.items))
    }
}

/// Drops items without a video id or snippet and fills display defaults.
fn videos_from_items(items: Vec<SearchItem>) -> Vec<VideoResource> {
    items
        .into_iter()
        .filter_map(|item| {
            let video_id = item
                .id
                .and_then(|id| id.video_id)
                .filter(|id| !id.trim().is_empty())?;
            let snippet = item.snippet?;
            Some(VideoResource {
                title: snippet
                    .title
                    .map(|t| decode_html_entities(&t))
                    .unwrap_or_else(|| "No Title".to_string()),
                channel: snippet
                    .channel_title
                    .map(|c| decode_html_entities(&c))
                    .unwrap_or_else(|| "Unknown Channel".to_string()),
                description: snippet
                    .description
                    .map(|d| decode_html_entities(&d))
                    .unwrap_or_else(|| "No Description".to_string()),
                url: watch_url(&video_id),
                video_id,
            })
        })
        .collect()
}

#[async_trait]
impl VideoSearch for YoutubeSearch {
    async fn search_videos(&self, query: &str) -> Vec<VideoResource> {
        match self.try_search(query).await {
            Ok(videos) => {
                debug!("YouTube search '{query}' returned {} videos", videos.len());
                videos
            }
            Err(e) => {
                error!("YouTube search failed for '{query}': {e}");
                Vec::new()
            }
        }
    }
}
