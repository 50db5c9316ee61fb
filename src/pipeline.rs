use crate::config::{FetchOptions, ObjectKind};
use crate::date::{format_date, iter_days, parse_date, TimeWindow};
use crate::error::{Error, Result};
use crate::filters::EntryFilter;
use crate::pacing::Pacing;
use crate::progress::make_day_progress;
use crate::query::{normalize_str, FetchRequest};
use crate::record::{data_rows, extract_record};
use crate::sink::OutputSink;
use crate::util::{ascii_only, init_tracing_once};
use anyhow::Context;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// How a single day's run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayOutcome {
    /// Response parsed; every row was either written, filtered, or diagnosed.
    Completed,
    /// The request itself failed; nothing was written for the day.
    NetworkFailed,
    /// The body had no usable `data` list; nothing was written for the day.
    FormatFailed,
}

/// Per-day result. `diagnostics` holds one entry per operator-facing warning.
#[derive(Debug)]
pub struct DayReport {
    pub date: String,
    pub kind: ObjectKind,
    pub subreddit: String,
    pub outcome: DayOutcome,
    pub received: u64,
    pub written: u64,
    pub filtered: u64,
    pub diagnostics: Vec<Error>,
}

impl DayReport {
    fn new(date: String, kind: ObjectKind, subreddit: String) -> Self {
        Self { date, kind, subreddit, outcome: DayOutcome::Completed, received: 0, written: 0, filtered: 0, diagnostics: Vec::new() }
    }
}

/// Paced, single-threaded fetcher of one search page per day.
///
/// Requests are strictly sequential: one in flight at a time, followed by the
/// configured pacing delay. No retries; a failed day is reported short and the
/// caller may re-run that date later.
#[derive(Clone)]
pub struct HistoryFetcher {
    pub(crate) opts: FetchOptions,
    client: Client,
}

impl Default for HistoryFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryFetcher {
    /// Fetcher with default options.
    ///
    /// # Panics
    /// If the HTTP client cannot be built (TLS backend initialisation failed).
    /// Use [`HistoryFetcher::try_with_options`] to get that as an error instead.
    pub fn new() -> Self {
        Self::with_options(FetchOptions::default())
    }

    /// # Panics
    /// Same as [`HistoryFetcher::new`].
    pub fn with_options(opts: FetchOptions) -> Self {
        match Self::try_with_options(opts) {
            Ok(f) => f,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new() -> Result<Self> {
        Self::try_with_options(FetchOptions::default())
    }

    /// Build the fetcher, returning `Error::Client` if the HTTP client cannot be created.
    pub fn try_with_options(opts: FetchOptions) -> Result<Self> {
        // No timeout is set beyond the client default.
        let client = Client::builder().build().map_err(Error::Client)?;
        Ok(Self { opts, client })
    }

    // -------- Builder methods --------
    pub fn api_root(mut self, root: impl AsRef<str>) -> Self { self.opts = self.opts.with_api_root(root); self }
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self { self.opts = self.opts.with_user_agent(ua); self }
    pub fn pacing<P: Pacing + 'static>(mut self, pacing: P) -> Self { self.opts = self.opts.with_pacing(pacing); self }
    pub fn pace_delay(mut self, delay: Duration) -> Self { self.opts = self.opts.with_pace_delay(delay); self }
    pub fn filter(mut self, filter: EntryFilter) -> Self { self.opts = self.opts.with_filter(filter); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn write_buffer(mut self, bytes: usize) -> Self { self.opts = self.opts.with_write_buffer(bytes); self }
    pub fn env_overrides(mut self) -> Self { self.opts = self.opts.with_env_overrides(); self }

    pub fn options(&self) -> &FetchOptions {
        &self.opts
    }

    /// Search URL for one day, without sending anything.
    pub fn url_for(&self, kind: ObjectKind, subreddit: &str, date: &str) -> Result<String> {
        let window = TimeWindow::for_date_str(date)?;
        FetchRequest::new(kind, subreddit, window).url(&self.opts.api_root)
    }

    /// Fetch one day into an already-open sink.
    ///
    /// Writes the `DATE:` header, then one entry per usable row, then the day
    /// trailer, and flushes. Network failures, a missing `data` field and bad
    /// rows are recorded in the report instead of returned. Only a malformed
    /// date, an unusable API root or a sink I/O failure is an error.
    pub fn fetch_day<W: Write>(
        &self,
        sink: &mut OutputSink<W>,
        kind: ObjectKind,
        subreddit: &str,
        date: &str,
    ) -> Result<DayReport> {
        let day = parse_date(date)?;
        let date = format_date(day);
        let request = FetchRequest::new(kind, subreddit, TimeWindow::for_day(day));
        let url = request.url(&self.opts.api_root)?;
        let mut report = DayReport::new(date.clone(), kind, request.subreddit.clone());

        sink.write_day_header(&date)?;

        tracing::debug!(%url, "requesting");
        let body = self.get_body(&url);
        self.opts.pacing.pause();

        match body.and_then(|b| parse_rows(&b, &date)) {
            Ok(rows) => {
                report.received = rows.len() as u64;
                for raw in &rows {
                    let entry = match extract_record(kind, raw) {
                        Ok(e) => e,
                        Err(e) => {
                            tracing::warn!(date = %date, kind = %kind, "{}", e);
                            report.diagnostics.push(e);
                            continue;
                        }
                    };
                    if !self.opts.filter.matches_entry(&entry) {
                        report.filtered += 1;
                        continue;
                    }
                    sink.write_entry(entry.score, &ascii_only(&entry.text))?;
                    report.written += 1;
                }
            }
            Err(e) => {
                report.outcome = match e {
                    Error::Network { .. } => DayOutcome::NetworkFailed,
                    _ => DayOutcome::FormatFailed,
                };
                tracing::warn!(date = %date, kind = %kind, "skipping day: {}", e);
                report.diagnostics.push(e);
            }
        }

        sink.write_day_trailer()?;
        sink.flush()?;
        tracing::info!(
            "{} r/{} {}: wrote {} of {} ({} filtered, {} diagnostics)",
            date, report.subreddit, kind, report.written, report.received, report.filtered, report.diagnostics.len()
        );
        Ok(report)
    }

    /// One-shot form: open `out_path` for appending, fetch one day, close.
    pub fn fetch_day_to_path(&self, out_path: &Path, kind: ObjectKind, subreddit: &str, date: &str) -> Result<DayReport> {
        init_tracing_once();
        parse_date(date)?;
        let mut sink = OutputSink::append(out_path, self.opts.write_buffer_bytes)?;
        let report = self.fetch_day(&mut sink, kind, subreddit, date)?;
        sink.finish()?;
        Ok(report)
    }

    /// Fetch every day in `[start, end]` (inclusive) in order, appending to one sink.
    ///
    /// The sink is opened once and closed when this returns, on every path.
    /// Per-day upstream problems do not stop the run.
    pub fn fetch_range(
        &self,
        out_path: &Path,
        kind: ObjectKind,
        subreddit: &str,
        start: &str,
        end: &str,
    ) -> anyhow::Result<Vec<DayReport>> {
        init_tracing_once();
        let first = parse_date(start)?;
        let last = parse_date(end)?;
        let days: Vec<_> = iter_days(first, last).collect();
        if days.is_empty() {
            tracing::warn!("Empty date range {}..={}. Nothing to fetch.", start, end);
            return Ok(Vec::new());
        }

        let mut sink = OutputSink::append(out_path, self.opts.write_buffer_bytes)
            .with_context(|| format!("open {}", out_path.display()))?;

        let pb = if self.opts.progress {
            Some(make_day_progress(days.len() as u64, &format!("r/{} {}s", normalize_str(subreddit), kind)))
        } else {
            None
        };

        let mut reports = Vec::with_capacity(days.len());
        for day in days {
            let date = format_date(day);
            let report = self
                .fetch_day(&mut sink, kind, subreddit, &date)
                .with_context(|| format!("fetching {} for {}", kind, date))?;
            if let Some(pb) = &pb { pb.inc(1); }
            reports.push(report);
        }

        if let Some(pb) = pb { pb.finish_with_message("done"); }
        sink.finish().with_context(|| format!("flush {}", out_path.display()))?;

        let total: u64 = reports.iter().map(|r| r.written).sum();
        let short = reports.iter().filter(|r| r.outcome != DayOutcome::Completed).count();
        tracing::info!("Fetched {} entries over {} days ({} days failed upstream)", total, reports.len(), short);
        Ok(reports)
    }

    fn get_body(&self, url: &str) -> Result<String> {
        self.client
            .get(url)
            .header(USER_AGENT, self.opts.user_agent.as_str())
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|source| Error::Network { url: url.to_string(), source })
    }
}

fn parse_rows(body: &str, date: &str) -> Result<Vec<Value>> {
    let val: Value = serde_json::from_str(body).map_err(|e| Error::UpstreamFormat {
        date: date.to_string(),
        reason: format!("body is not JSON: {}", e),
    })?;
    data_rows(val, date)
}
