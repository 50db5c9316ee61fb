use crate::filters::EntryFilter;
use crate::pacing::{FixedPacing, Pacing};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_API_ROOT: &str = "https://api.pushshift.io";
pub const DEFAULT_USER_AGENT: &str = "redsent/0.1 (historical subreddit sentiment fetcher)";

/// Kind of upstream object to search (comments or submissions).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Comment,
    Submission,
}

impl ObjectKind {
    /// Path segment used by the search endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Comment => "comment",
            ObjectKind::Submission => "submission",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "comment" | "comments" => Ok(ObjectKind::Comment),
            "submission" | "submissions" => Ok(ObjectKind::Submission),
            other => Err(format!("unknown object kind {other:?}: expected comment or submission")),
        }
    }
}

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone)]
pub struct FetchOptions {
    pub api_root: String,             // no trailing slash
    pub user_agent: String,
    pub pacing: Arc<dyn Pacing>,      // applied after every request
    pub filter: EntryFilter,
    pub progress: bool,               // day progress bar in range runs
    pub write_buffer_bytes: usize,    // BufWriter capacity for the sink
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            pacing: Arc::new(FixedPacing::default()),
            filter: EntryFilter::default(),
            progress: false,
            write_buffer_bytes: 64 * 1024,
        }
    }
}

impl fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("api_root", &self.api_root)
            .field("user_agent", &self.user_agent)
            .field("filter", &self.filter)
            .field("progress", &self.progress)
            .field("write_buffer_bytes", &self.write_buffer_bytes)
            .finish_non_exhaustive()
    }
}

impl FetchOptions {
    pub fn with_api_root(mut self, root: impl AsRef<str>) -> Self {
        self.api_root = root.as_ref().trim().trim_end_matches('/').to_string();
        self
    }
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }
    pub fn with_pacing<P: Pacing + 'static>(mut self, pacing: P) -> Self {
        self.pacing = Arc::new(pacing);
        self
    }
    pub fn with_pace_delay(self, delay: Duration) -> Self {
        self.with_pacing(FixedPacing::new(delay))
    }
    pub fn with_filter(mut self, filter: EntryFilter) -> Self {
        self.filter = filter;
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_write_buffer(mut self, bytes: usize) -> Self {
        self.write_buffer_bytes = bytes.max(8 * 1024);
        self
    }

    /// Apply overrides from the environment:
    /// - REDSENT_API_ROOT: upstream root URL
    /// - REDSENT_USER_AGENT: identifying header value
    /// - REDSENT_PACE_MS: fixed delay after each request, in milliseconds
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(root) = std::env::var("REDSENT_API_ROOT") {
            if !root.trim().is_empty() {
                self = self.with_api_root(root);
            }
        }
        if let Ok(ua) = std::env::var("REDSENT_USER_AGENT") {
            if !ua.trim().is_empty() {
                self.user_agent = ua;
            }
        }
        if let Ok(ms) = std::env::var("REDSENT_PACE_MS") {
            match ms.trim().parse::<u64>() {
                Ok(ms) => self = self.with_pace_delay(Duration::from_millis(ms)),
                Err(_) => tracing::warn!("REDSENT_PACE_MS is set but not a number: {}", ms),
            }
        }
        self
    }
}
