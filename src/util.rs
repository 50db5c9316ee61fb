use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

static INIT_ONCE: std::sync::Once = std::sync::Once::new();
pub fn init_tracing_once() {
    INIT_ONCE.call_once(|| {
        let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
    });
}

/// Drop every character outside 7-bit ASCII, keeping the rest in order.
/// Lossy: accents, emoji and CJK text simply disappear.
pub fn ascii_only(s: &str) -> String {
    s.chars().filter(char::is_ascii).collect()
}

/// Open `path` for appending, creating it and its parent directories if needed.
/// Never truncates existing content. Failures are returned as-is, without retries.
pub fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}
