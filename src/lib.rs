mod config;
mod date;
mod error;
mod query;
mod record;

mod filters;
mod pacing;
mod progress;
mod sink;
mod util;
mod pipeline;

mod hot;
mod sentiment;

pub use crate::config::{FetchOptions, ObjectKind, DEFAULT_API_ROOT, DEFAULT_USER_AGENT};
pub use crate::date::{epoch_for_date, epoch_of, format_date, iter_days, parse_date, TimeWindow, SECONDS_PER_DAY};
pub use crate::error::{Error, Result};
pub use crate::query::{build_search_url, normalize_str, FetchRequest, RESULT_LIMIT};
pub use crate::pipeline::{DayOutcome, DayReport, HistoryFetcher};

// Extraction boundary, exposed for callers that bring their own payloads.
pub use crate::record::{data_rows, extract_record, record_identifier, CommentFields, Extracted, SubmissionFields};

// Output format and pacing policies.
pub use crate::sink::{OutputSink, DAY_TRAILER, ENTRY_SEPARATOR};
pub use crate::pacing::{FixedPacing, NoPacing, Pacing, DEFAULT_PACE};

pub use crate::filters::{title_matches_any, EntryFilter};
pub use crate::util::{ascii_only, init_tracing_once};

pub use crate::hot::{posts_matching, HotPost, HotPostSource};
pub use crate::sentiment::{aggregate_sentiment, sentiment_score, weighted_mean_polarity, PolarityAnalyzer};
