use crate::util::open_append;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Line closing every entry.
pub const ENTRY_SEPARATOR: &str = "----------";
/// Written once after each day's entries.
pub const DAY_TRAILER: &str = "\n\n";

/// Append-only text log of fetched entries.
///
/// Layout per day:
/// ```text
/// DATE: 2023-01-01
/// 5
/// first comment
/// ----------
/// ```
/// followed by a blank trailer block. Existing content is never truncated.
/// Dropping the sink flushes it, so it is closed on every exit path.
pub struct OutputSink<W: Write = BufWriter<File>> {
    path: Option<PathBuf>,
    w: W,
    entries: u64,
}

impl OutputSink<BufWriter<File>> {
    /// Open `path` for appending, creating it when absent.
    pub fn append(path: &Path, buf_bytes: usize) -> io::Result<Self> {
        let f = open_append(path)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            w: BufWriter::with_capacity(buf_bytes.max(8 * 1024), f),
            entries: 0,
        })
    }
}

impl<W: Write> OutputSink<W> {
    /// Wrap any writer (used for in-memory sinks).
    pub fn from_writer(w: W) -> Self {
        Self { path: None, w, entries: 0 }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Entries written through this sink since it was opened.
    pub fn entries_written(&self) -> u64 {
        self.entries
    }

    pub fn write_day_header(&mut self, date: &str) -> io::Result<()> {
        writeln!(self.w, "DATE: {}", date)
    }

    /// `<score>\n<text>\n<separator>\n`; `text` must already be sanitized.
    pub fn write_entry(&mut self, score: i64, text: &str) -> io::Result<()> {
        writeln!(self.w, "{}", score)?;
        self.w.write_all(text.as_bytes())?;
        self.w.write_all(b"\n")?;
        self.w.write_all(ENTRY_SEPARATOR.as_bytes())?;
        self.w.write_all(b"\n")?;
        self.entries += 1;
        Ok(())
    }

    pub fn write_day_trailer(&mut self) -> io::Result<()> {
        self.w.write_all(DAY_TRAILER.as_bytes())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.w.flush()
    }

    /// Flush and hand back the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.w.flush()?;
        Ok(self.w)
    }
}
