//! Live "hot posts" collaborator seam.
//!
//! The authenticated client lives outside this crate; it only has to implement
//! [`HotPostSource`]. We add title filtering on top.

use crate::filters::title_matches_any;
use anyhow::{Context, Result};
use time::OffsetDateTime;

/// One post from a subreddit's hot listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HotPost {
    pub title: String,
    pub id: String,
    /// Opaque handle the client uses to load the comment tree.
    pub comments: String,
    pub created_utc: i64,
}

impl HotPost {
    /// Creation time as a UTC timestamp (None if out of range).
    pub fn created_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.created_utc).ok()
    }
}

pub trait HotPostSource {
    fn fetch_hot(&self, subreddit: &str, limit: usize) -> Result<Vec<HotPost>>;
}

/// Fetch up to `limit` hot posts and keep those whose title contains any of
/// `title_conditions` (case-sensitive). Each post is kept at most once, in
/// listing order. An empty condition list keeps everything.
pub fn posts_matching<S, C>(source: &S, subreddit: &str, limit: usize, title_conditions: &[C]) -> Result<Vec<HotPost>>
where
    S: HotPostSource + ?Sized,
    C: AsRef<str>,
{
    let sub = crate::query::normalize_str(subreddit);
    let posts = source
        .fetch_hot(&sub, limit)
        .with_context(|| format!("fetching hot posts for r/{}", sub))?;
    let kept: Vec<HotPost> = posts
        .into_iter()
        .take(limit)
        .filter(|p| title_matches_any(&p.title, title_conditions))
        .collect();
    tracing::debug!(subreddit = %sub, kept = kept.len(), "filtered hot posts");
    Ok(kept)
}
