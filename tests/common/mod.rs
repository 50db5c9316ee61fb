#![allow(dead_code)]

use redsent::Pacing;
use serde_json::{json, Value};
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// Canned upstream response: status line plus body.
pub struct Reply {
    pub status: &'static str,
    pub body: String,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: "200 OK", body: body.into() }
    }
    pub fn ok_json(v: &Value) -> Self {
        Self::ok(v.to_string())
    }
    pub fn status(status: &'static str, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }
}

/// Serve `replies` in order, one connection each, on a local port.
/// Returns the base URL and a handle yielding the raw request heads received.
pub fn spawn_upstream(replies: Vec<Reply>) -> (String, thread::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let mut heads = Vec::new();
        for reply in replies {
            let (mut stream, _) = listener.accept().unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = stream.read(&mut buf).unwrap_or(0);
                if n == 0 { break; }
                head.extend_from_slice(&buf[..n]);
                if head.windows(4).any(|w| w == b"\r\n\r\n") { break; }
            }
            heads.push(String::from_utf8_lossy(&head).into_owned());
            let headers = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                reply.status,
                reply.body.len()
            );
            stream.write_all(headers.as_bytes()).unwrap();
            stream.write_all(reply.body.as_bytes()).unwrap();
            let _ = stream.flush();
        }
        heads
    });
    (format!("http://{addr}"), handle)
}

/// A base URL nothing is listening on (bind, read the port, release it).
pub fn dead_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Request target (path + query) from a raw request head.
pub fn request_target(head: &str) -> String {
    head.lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("")
        .to_string()
}

/// Pacing policy that only counts how often it was asked to pause.
#[derive(Clone, Default)]
pub struct CountingPacing(pub Arc<AtomicUsize>);

impl CountingPacing {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl Pacing for CountingPacing {
    fn pause(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn comment(score: i64, body: &str, permalink: &str) -> Value {
    json!({
        "author": "alice", "body": body, "created_utc": 1672531300,
        "id": permalink.rsplit('/').find(|s| !s.is_empty()).unwrap_or("x"),
        "permalink": permalink, "score": score, "subreddit": "test"
    })
}

pub fn submission(score: i64, title: &str, selftext: Option<&str>, url: &str) -> Value {
    let mut v = json!({
        "author": "bob", "created_utc": 1672531400, "id": "s1",
        "score": score, "subreddit": "test", "title": title, "url": url
    });
    if let Some(st) = selftext {
        v["selftext"] = json!(st);
    }
    v
}

pub fn read_text(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

/// Entry blocks (score, text) in file order, parsed back from the sink layout.
pub fn parse_entries(text: &str) -> Vec<(i64, String)> {
    let mut out = Vec::new();
    let lines: Vec<&str> = text.lines().collect();
    let mut i = 0;
    while i < lines.len() {
        if let Ok(score) = lines[i].parse::<i64>() {
            let mut body = Vec::new();
            let mut j = i + 1;
            while j < lines.len() && lines[j] != redsent::ENTRY_SEPARATOR {
                body.push(lines[j]);
                j += 1;
            }
            out.push((score, body.join("\n")));
            i = j + 1;
        } else {
            i += 1;
        }
    }
    out
}
