//! Error kinds for the fetcher. Only `Parse`, `Config`, `Client` and `Io` ever escape a
//! day run; the others are absorbed and carried in `DayReport::diagnostics`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Caller supplied a date that is not `YYYY-MM-DD`.
    #[error("invalid date {input:?}: expected YYYY-MM-DD ({reason})")]
    Parse { input: String, reason: String },

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body was not JSON, or had no top-level `data` list.
    #[error("unexpected upstream payload for {date}: {reason}")]
    UpstreamFormat { date: String, reason: String },

    #[error("skipped record {identifier}: {reason}")]
    RecordExtraction { identifier: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
