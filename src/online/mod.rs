//! Blocking HTTP access: fetch, decode, download and check remote resources.
//!
//! Failures before a response arrives are [`Error::Unreachable`](crate::Error::Unreachable),
//! non-success statuses are [`Error::Status`](crate::Error::Status) and bodies that
//! cannot be decoded as requested are [`Error::Malformed`](crate::Error::Malformed).
//! Caching is opt-in through [`FetchConfig::cache`].

mod client;
mod config;
mod url;

use serde_json::Value;

pub use self::client::Fetcher;
pub use self::config::{CacheConfig, FetchConfig};
pub use self::url::{build_url, UrlParts};

/// How a response body is decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Stream {
    #[default]
    Json,
    Text,
    Bytes,
}

impl Stream {
    /// Archives are read as raw bytes, anything else as JSON.
    pub fn infer(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or(url).to_ascii_lowercase();
        if [".zip", ".gz", ".tgz", ".tar", ".7z"].iter().any(|ext| path.ends_with(ext)) {
            Stream::Bytes
        } else {
            Stream::Json
        }
    }
}

/// Decoded response body.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
    Bytes(Vec<u8>),
}

impl Payload {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Raw bytes of the payload; JSON is re-serialised.
    pub fn into_bytes(self) -> crate::Result<Vec<u8>> {
        Ok(match self {
            Payload::Json(v) => serde_json::to_vec(&v)?,
            Payload::Text(t) => t.into_bytes(),
            Payload::Bytes(b) => b,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_stream_from_url() {
        assert_eq!(Stream::infer("https://gisco.eu/data/NUTS_2021.ZIP"), Stream::Bytes);
        assert_eq!(Stream::infer("https://x.org/a.csv.gz?token=1"), Stream::Bytes);
        assert_eq!(Stream::infer("https://x.org/api?q=zip"), Stream::Json);
    }

    #[test]
    fn unreachable_host_is_distinct() {
        let fetcher = Fetcher::new(FetchConfig::default()).unwrap();
        let err = fetcher.get("http://127.0.0.1:1/").unwrap_err();
        assert!(err.is_unreachable(), "{err}");
    }
}
