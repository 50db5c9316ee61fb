//! Search request description and URL construction. Nothing here touches the network.

use crate::config::ObjectKind;
use crate::date::TimeWindow;
use crate::error::{Error, Result};
use reqwest::Url;

pub const RESULT_LIMIT: u32 = 1000;
pub const SORT_FIELD: &str = "score";
pub const SORT_ORDER: &str = "desc";

/// One single-page search for one subreddit over one day.
/// Sort and limit are fixed; results past `RESULT_LIMIT` for a day are not reachable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub kind: ObjectKind,
    pub subreddit: String, // normalized lowercase, no "r/"
    pub window: TimeWindow,
}

impl FetchRequest {
    pub fn new(kind: ObjectKind, subreddit: impl AsRef<str>, window: TimeWindow) -> Self {
        Self { kind, subreddit: normalize_str(subreddit.as_ref()), window }
    }

    pub fn sort_field(&self) -> &'static str { SORT_FIELD }
    pub fn sort_order(&self) -> &'static str { SORT_ORDER }
    pub fn limit(&self) -> u32 { RESULT_LIMIT }

    /// Fully-qualified search URL under `api_root`.
    pub fn url(&self, api_root: &str) -> Result<String> {
        build_search_url(api_root, self.kind, &self.subreddit, self.window)
    }
}

/// `{api_root}/reddit/{kind}/search?limit=1000&sort_type=score&sort=desc&subreddit=..&after=..&before=..`
///
/// Parameter order is fixed so identical inputs always produce identical strings.
pub fn build_search_url(api_root: &str, kind: ObjectKind, subreddit: &str, window: TimeWindow) -> Result<String> {
    let root = api_root.trim().trim_end_matches('/');
    let base = format!("{}/reddit/{}/search", root, kind.as_str());
    let limit = RESULT_LIMIT.to_string();
    let after = window.start.to_string();
    let before = window.end.to_string();
    let sub = normalize_str(subreddit);
    let url = Url::parse_with_params(
        &base,
        &[
            ("limit", limit.as_str()),
            ("sort_type", SORT_FIELD),
            ("sort", SORT_ORDER),
            ("subreddit", sub.as_str()),
            ("after", after.as_str()),
            ("before", before.as_str()),
        ],
    )
    .map_err(|e| Error::Config(format!("api root {:?}: {}", api_root, e)))?;
    Ok(url.into())
}

#[inline]
pub fn normalize_str(s: &str) -> String {
    let s = s.trim().to_lowercase();
    if let Some(rest) = s.strip_prefix("r/") { rest.to_string() } else { s }
}
