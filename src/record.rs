//! Extraction boundary for upstream records.
//!
//! Upstream rows are schema-less, so each one is first deserialized into a
//! typed view whose fields are all optional, then checked for the fields the
//! object kind requires. A missing or mistyped field becomes an explicit
//! `Error::RecordExtraction` for that row only.

use crate::config::ObjectKind;
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// Separator placed between a submission's title and its selftext.
pub const TITLE_SELFTEXT_SEPARATOR: &str = "\n";

/// Comment fields we read. Extra fields are ignored by serde.
/// Only the required fields are typed; identifiers are read separately.
#[derive(Debug, Deserialize)]
pub struct CommentFields {
    pub score: Option<i64>,
    pub body: Option<String>,
}

/// Submission fields we read. Extra fields are ignored by serde.
/// `selftext` is optional, so any non-string value counts as absent.
#[derive(Debug, Deserialize)]
pub struct SubmissionFields {
    pub score: Option<i64>,
    pub title: Option<String>,
    pub selftext: Option<Value>,
}

/// A record that passed extraction. `text` is not yet sanitized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extracted {
    pub score: i64,
    pub text: String,
    pub identifier: String,
}

/// Best-effort label for diagnostics: permalink (comments) or url (submissions),
/// then `id`, then a placeholder.
pub fn record_identifier(kind: ObjectKind, v: &Value) -> String {
    let primary = match kind {
        ObjectKind::Comment => "permalink",
        ObjectKind::Submission => "url",
    };
    let label = |key: &str| match v.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    label(primary)
        .or_else(|| label("id"))
        .unwrap_or_else(|| "<unidentified>".to_string())
}

fn missing(identifier: String, field: &str) -> Error {
    Error::RecordExtraction { identifier, reason: format!("missing required field `{}`", field) }
}

/// Pull score and text out of one raw row.
pub fn extract_record(kind: ObjectKind, raw: &Value) -> Result<Extracted> {
    match kind {
        ObjectKind::Comment => {
            let identifier = record_identifier(kind, raw);
            let f = CommentFields::deserialize(raw).map_err(|e| Error::RecordExtraction {
                identifier: identifier.clone(),
                reason: e.to_string(),
            })?;
            let score = f.score.ok_or_else(|| missing(identifier.clone(), "score"))?;
            let body = f.body.ok_or_else(|| missing(identifier.clone(), "body"))?;
            Ok(Extracted { score, text: body, identifier })
        }
        ObjectKind::Submission => {
            let identifier = record_identifier(kind, raw);
            let f = SubmissionFields::deserialize(raw).map_err(|e| Error::RecordExtraction {
                identifier: identifier.clone(),
                reason: e.to_string(),
            })?;
            let score = f.score.ok_or_else(|| missing(identifier.clone(), "score"))?;
            let mut text = f.title.ok_or_else(|| missing(identifier.clone(), "title"))?;
            if let Some(selftext) = f.selftext.as_ref().and_then(Value::as_str).filter(|s| !s.is_empty()) {
                text.push_str(TITLE_SELFTEXT_SEPARATOR);
                text.push_str(selftext);
            }
            Ok(Extracted { score, text, identifier })
        }
    }
}

/// Split a parsed response body into its row list.
/// Fails when the top-level `data` field is absent or not a list.
pub fn data_rows(body: Value, date: &str) -> Result<Vec<Value>> {
    let mut obj = match body {
        Value::Object(map) => map,
        other => {
            return Err(Error::UpstreamFormat {
                date: date.to_string(),
                reason: format!("expected a JSON object, got {}", json_kind(&other)),
            })
        }
    };
    match obj.remove("data") {
        Some(Value::Array(rows)) => Ok(rows),
        Some(other) => Err(Error::UpstreamFormat {
            date: date.to_string(),
            reason: format!("`data` is {}, not a list", json_kind(&other)),
        }),
        None => Err(Error::UpstreamFormat { date: date.to_string(), reason: "missing top-level `data` field".into() }),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
