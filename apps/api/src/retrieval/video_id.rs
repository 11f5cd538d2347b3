//! Recovers YouTube video ids from the URL shapes users and models produce.

use std::sync::OnceLock;

use regex::Regex;
use reqwest::Url;

const WATCH_HOSTS: [&str; 3] = ["youtube.com", "www.youtube.com", "m.youtube.com"];
const SHORT_LINK_HOST: &str = "youtu.be";

fn id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("video id pattern is valid"))
}

/// True for strings shaped like a YouTube video id.
pub fn is_video_id(id: &str) -> bool {
    id_pattern().is_match(id)
}

/// Extracts the video id from `watch?v=`, `youtu.be/<id>`, `/embed/<id>` and
/// `/shorts/<id>` URLs on YouTube hosts. A missing scheme is tolerated; any
/// other host or path yields `None`.
pub fn extract_video_id(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    let parsed = Url::parse(url)
        .or_else(|_| Url::parse(&format!("https://{url}")))
        .ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());

    let candidate = if host == SHORT_LINK_HOST {
        segments.next().map(str::to_string)
    } else if WATCH_HOSTS.contains(&host.as_str()) {
        match segments.next() {
            Some("watch") => parsed
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned()),
            Some("embed") | Some("shorts") => segments.next().map(str::to_string),
            _ => None,
        }
    } else {
        None
    };

    candidate.filter(|id| is_video_id(id))
}

/// Canonical watch URL for a video id.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}
