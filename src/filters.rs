//! Simple text and score predicates applied to extracted entries and hot-post titles.

use crate::record::Extracted;
use regex::Regex;

/// Entry filter. Keywords are matched case-insensitively (stored lowercase).
/// The default passes everything.
#[derive(Clone, Debug, Default)]
pub struct EntryFilter {
    pub keywords_any: Option<Vec<String>>, // substring in text
    pub text_regex: Option<Regex>,
    pub min_score: Option<i64>,
    pub max_score: Option<i64>,
}

impl EntryFilter {
    /// Lowercase, trim, drop empties, then sort + dedup keywords.
    pub fn normalize(mut self) -> Self {
        if let Some(kws) = self.keywords_any.as_mut() {
            for s in kws.iter_mut() { *s = s.trim().to_lowercase(); }
            kws.retain(|s| !s.is_empty());
            kws.sort(); kws.dedup();
        }
        self
    }

    pub fn keywords_any<I, S>(mut self, iter: I) -> Self where I: IntoIterator<Item = S>, S: AsRef<str> {
        self.keywords_any = Some(iter.into_iter().map(|s| s.as_ref().to_string()).collect());
        self.normalize()
    }
    pub fn text_regex(mut self, re: Regex) -> Self { self.text_regex = Some(re); self }
    pub fn min_score(mut self, v: i64) -> Self { self.min_score = Some(v); self }
    pub fn max_score(mut self, v: i64) -> Self { self.max_score = Some(v); self }

    pub fn is_pass_all(&self) -> bool {
        self.keywords_any.is_none() && self.text_regex.is_none() && self.min_score.is_none() && self.max_score.is_none()
    }

    pub fn matches(&self, score: i64, text: &str) -> bool {
        if let Some(min_s) = self.min_score {
            if score < min_s { return false; }
        }
        if let Some(max_s) = self.max_score {
            if score > max_s { return false; }
        }
        if let Some(ref kws) = self.keywords_any {
            if !kws.is_empty() {
                let hay = text.to_lowercase();
                if !kws.iter().any(|kw| hay.contains(kw.as_str())) { return false; }
            }
        }
        if let Some(re) = &self.text_regex {
            if !re.is_match(text) { return false; }
        }
        true
    }

    pub fn matches_entry(&self, e: &Extracted) -> bool {
        self.matches(e.score, &e.text)
    }
}

/// Case-sensitive "title contains any condition".
/// An empty condition list, or an empty condition, accepts every title.
pub fn title_matches_any<S: AsRef<str>>(title: &str, conditions: &[S]) -> bool {
    conditions.is_empty() || conditions.iter().any(|c| title.contains(c.as_ref()))
}
