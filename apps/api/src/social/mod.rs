// Social layer: posts with like/comment counters and live study sessions.
//
// Every write is awaited and its failure returned to the caller. Composite
// writes (child row + parent counter) share one transaction, so `like_count`
// and `comment_count` always equal the number of child rows.

pub mod handlers;
pub mod posts;
pub mod study_sessions;

use crate::errors::AppError;

pub const MAX_CONTENT_CHARS: usize = 2000;
pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 200;

/// Trims user text and enforces the length limits shared by posts, comments and topics.
pub fn validate_text<'a>(field: &str, value: &'a str) -> Result<&'a str, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    if value.chars().count() > MAX_CONTENT_CHARS {
        return Err(AppError::Validation(format!(
            "{field} exceeds {MAX_CONTENT_CHARS} characters"
        )));
    }
    Ok(value)
}

/// Clamps a client-supplied page size.
pub fn page_size(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}
