//! Test doubles for retrieval: fixed-result tools and a throwaway HTTP server.

use async_trait::async_trait;
use axum::Router;

use super::{ArticleResource, ArticleSearch, VideoResource, VideoSearch};

/// Returns the same results for every query. `Fixed::empty()` models a failed tool.
pub struct Fixed<T> {
    pub results: Vec<T>,
}

impl<T> Fixed<T> {
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
        }
    }
}

#[async_trait]
impl VideoSearch for Fixed<VideoResource> {
    async fn search_videos(&self, _query: &str) -> Vec<VideoResource> {
        self.results.clone()
    }
}

#[async_trait]
impl ArticleSearch for Fixed<ArticleResource> {
    async fn search_articles(&self, _query: &str) -> Vec<ArticleResource> {
        self.results.clone()
    }
}

/// Serves `app` on an ephemeral localhost port and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
