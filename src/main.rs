use anyhow::Result;
use redsent::{HistoryFetcher, ObjectKind};
use std::path::PathBuf;

const OUT_ROOT: &str = "./data";

fn main() -> Result<()> {
    let out_dir = PathBuf::from(OUT_ROOT);
    std::fs::create_dir_all(&out_dir)?;

    let subreddit = "wallstreetbets";
    let start = "2021-01-25";
    let end = "2021-01-31";

    let fetcher = HistoryFetcher::new().env_overrides().progress(true);

    for kind in [ObjectKind::Submission, ObjectKind::Comment] {
        let out = out_dir.join(format!("{}_{}s_{}_{}.txt", subreddit, kind, start, end));
        let reports = fetcher.fetch_range(&out, kind, subreddit, start, end)?;
        let written: u64 = reports.iter().map(|r| r.written).sum();
        println!("{} {}s written to {}", written, kind, out.display());
    }

    Ok(())
}
