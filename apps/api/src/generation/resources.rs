//! Study resources: videos and articles for a study goal, taken only from
//! real search results.
//!
//! The model is used to turn the goal into search queries; it never supplies
//! a resource itself. Every tool failure degrades to an empty list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::generation::pipeline::{generate_structured, prompt_input, GenerationError};
use crate::generation::prompts::{SEARCH_QUERY_PERSONA, SEARCH_QUERY_PROMPT_TEMPLATE};
use crate::generation::schema::{http_url, is_http_url, non_empty, Schema, SchemaViolation};
use crate::llm_client::prompts::json_system;
use crate::llm_client::TextGenerator;
use crate::retrieval::video_id::{extract_video_id, is_video_id, watch_url};
use crate::retrieval::{ArticleResource, ArticleSearch, VideoResource, VideoSearch};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchQueries {
    pub video_query: String,
    pub article_query: String,
}

impl Schema for SearchQueries {
    fn validate(&self) -> Result<(), SchemaViolation> {
        non_empty("videoQuery", &self.video_query)?;
        non_empty("articleQuery", &self.article_query)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyResources {
    pub youtube_videos: Vec<VideoResource>,
    pub articles: Vec<ArticleResource>,
}

impl StudyResources {
    /// Repairs what can be repaired and drops the rest: videos get their id
    /// recovered from a YouTube URL when missing, entries without a well-formed
    /// id are dropped, URLs not pointing at that id are rebuilt from it, and
    /// duplicates are removed.
    pub fn sanitized(self) -> Self {
        let mut seen_videos = HashSet::new();
        let youtube_videos = self
            .youtube_videos
            .into_iter()
            .filter_map(|mut video| {
                video.video_id = video.video_id.trim().to_string();
                if video.video_id.is_empty() {
                    video.video_id = extract_video_id(&video.url)?;
                }
                if !is_video_id(&video.video_id) {
                    return None;
                }
                if extract_video_id(&video.url).as_deref() != Some(video.video_id.as_str()) {
                    video.url = watch_url(&video.video_id);
                }
                seen_videos.insert(video.video_id.clone()).then_some(video)
            })
            .collect();

        let mut seen_urls = HashSet::new();
        let articles = self
            .articles
            .into_iter()
            .filter(|a| is_http_url(&a.url) && !a.title.trim().is_empty())
            .filter(|a| seen_urls.insert(a.url.clone()))
            .collect();

        Self {
            youtube_videos,
            articles,
        }
    }
}

impl Schema for StudyResources {
    fn validate(&self) -> Result<(), SchemaViolation> {
        for (i, video) in self.youtube_videos.iter().enumerate() {
            if !is_video_id(&video.video_id) {
                return Err(SchemaViolation::new(
                    format!("youtubeVideos[{i}].videoId"),
                    format!("'{}' is not a video id", video.video_id),
                ));
            }
            http_url(&format!("youtubeVideos[{i}].url"), &video.url)?;
        }
        for (i, article) in self.articles.iter().enumerate() {
            non_empty(&format!("articles[{i}].title"), &article.title)?;
            http_url(&format!("articles[{i}].url"), &article.url)?;
        }
        Ok(())
    }
}

/// Asks the model for focused search queries, falling back to the raw goal.
async fn plan_queries(study_goal: &str, llm: &dyn TextGenerator) -> SearchQueries {
    let prompt = SEARCH_QUERY_PROMPT_TEMPLATE.replace("{study_goal}", study_goal);
    match generate_structured::<SearchQueries>(llm, &prompt, &json_system(SEARCH_QUERY_PERSONA))
        .await
    {
        Ok(queries) => queries,
        Err(e) => {
            warn!("Query planning failed, searching with the raw goal: {e}");
            SearchQueries {
                video_query: study_goal.to_string(),
                article_query: study_goal.to_string(),
            }
        }
    }
}

/// Recommends videos and articles for `study_goal`.
///
/// Only an unusable goal is an error; tool and model failures yield fewer
/// (possibly zero) results.
pub async fn generate_study_resources(
    study_goal: &str,
    llm: &dyn TextGenerator,
    videos: &dyn VideoSearch,
    articles: &dyn ArticleSearch,
) -> Result<StudyResources, GenerationError> {
    let study_goal = prompt_input("studyGoal", study_goal)?;
    let queries = plan_queries(study_goal, llm).await;

    let (youtube_videos, articles) = tokio::join!(
        videos.search_videos(queries.video_query.trim()),
        articles.search_articles(queries.article_query.trim()),
    );

    let resources = StudyResources {
        youtube_videos,
        articles,
    }
    .sanitized();

    info!(
        "Resources for '{study_goal}': {} videos, {} articles",
        resources.youtube_videos.len(),
        resources.articles.len()
    );

    Ok(resources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::stub::ScriptedGenerator;
    use crate::retrieval::stub::Fixed;

    fn video(id: &str, url: &str) -> VideoResource {
        VideoResource {
            title: "Python Basics".into(),
            channel: "Corey Schafer".into(),
            description: "Intro".into(),
            url: url.into(),
            video_id: id.into(),
        }
    }

    fn article(url: &str) -> ArticleResource {
        ArticleResource {
            title: "Python Basics".into(),
            url: url.into(),
            description: None,
        }
    }

    const QUERIES: &str = r#"{"videoQuery": "python basics tutorial", "articleQuery": "python basics guide"}"#;

    #[tokio::test]
    async fn test_tool_failure_yields_empty_lists_not_error() {
        let llm = ScriptedGenerator::new(vec![QUERIES]);
        let out = generate_study_resources(
            "Learn Python basics",
            &llm,
            &Fixed::<VideoResource>::empty(),
            &Fixed::<ArticleResource>::empty(),
        )
        .await
        .unwrap();

        assert!(out.youtube_videos.is_empty());
        assert!(out.articles.is_empty());
    }

    #[tokio::test]
    async fn test_everything_failing_still_succeeds() {
        let llm = ScriptedGenerator::failing();
        let out = generate_study_resources(
            "Learn Python basics",
            &llm,
            &Fixed::<VideoResource>::empty(),
            &Fixed::<ArticleResource>::empty(),
        )
        .await;
        assert!(out.is_ok());
    }

    #[tokio::test]
    async fn test_results_come_from_tools() {
        let llm = ScriptedGenerator::new(vec![QUERIES]);
        let videos = Fixed {
            results: vec![video("rfscVS0vtbw", "https://www.youtube.com/watch?v=rfscVS0vtbw")],
        };
        let articles = Fixed {
            results: vec![article("https://docs.python.org/3/tutorial/")],
        };

        let out = generate_study_resources("Learn Python basics", &llm, &videos, &articles)
            .await
            .unwrap();

        assert_eq!(out.youtube_videos.len(), 1);
        assert_eq!(out.articles.len(), 1);
        assert!(out.validate().is_ok());
    }

    #[tokio::test]
    async fn test_blank_goal_is_rejected() {
        let llm = ScriptedGenerator::failing();
        let err = generate_study_resources(
            " ",
            &llm,
            &Fixed::<VideoResource>::empty(),
            &Fixed::<ArticleResource>::empty(),
        )
        .await
        .unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_sanitize_recovers_missing_video_id() {
        let resources = StudyResources {
            youtube_videos: vec![
                video("", "https://youtu.be/rfscVS0vtbw"),
                video("", ""),
                video("kqtD5dpn9C8", ""),
            ],
            articles: vec![],
        }
        .sanitized();

        assert_eq!(resources.youtube_videos.len(), 2);
        assert_eq!(resources.youtube_videos[0].video_id, "rfscVS0vtbw");
        assert_eq!(
            resources.youtube_videos[1].url,
            "https://www.youtube.com/watch?v=kqtD5dpn9C8"
        );
        assert!(resources.youtube_videos.iter().all(|v| !v.video_id.is_empty()));
    }

    #[test]
    fn test_sanitize_never_turns_other_links_into_videos() {
        let resources = StudyResources {
            youtube_videos: vec![
                video("", "https://docs.python.org/3/tutorial"),
                video("", "https://www.youtube.com/channel/UC8butISFwT-Wl7EV0hUK0BQ"),
                video("tutorial", "https://docs.python.org/3/tutorial"),
                video("", "https://example.com/watch?v=rfscVS0vtbw"),
            ],
            articles: vec![],
        }
        .sanitized();

        assert!(resources.youtube_videos.is_empty());
    }

    #[test]
    fn test_sanitize_points_url_at_the_video_id() {
        let resources = StudyResources {
            youtube_videos: vec![video("rfscVS0vtbw", "https://example.com/some-page")],
            articles: vec![],
        }
        .sanitized();

        assert_eq!(
            resources.youtube_videos[0].url,
            "https://www.youtube.com/watch?v=rfscVS0vtbw"
        );
    }

    #[test]
    fn test_sanitize_drops_placeholder_and_duplicate_articles() {
        let resources = StudyResources {
            youtube_videos: vec![],
            articles: vec![
                article("https://docs.python.org/3/tutorial/"),
                article("https://docs.python.org/3/tutorial/"),
                article("example.com/your-article-here"),
                article(""),
            ],
        }
        .sanitized();

        assert_eq!(resources.articles.len(), 1);
        assert!(resources.validate().is_ok());
    }

    #[test]
    fn test_sanitize_drops_duplicate_videos() {
        let resources = StudyResources {
            youtube_videos: vec![
                video("rfscVS0vtbw", "https://www.youtube.com/watch?v=rfscVS0vtbw"),
                video("", "https://youtu.be/rfscVS0vtbw"),
            ],
            articles: vec![],
        }
        .sanitized();
        assert_eq!(resources.youtube_videos.len(), 1);
    }
}
