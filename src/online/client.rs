use std::{io::Write, path::Path};

use log::{debug, info};
use reqwest::{
    blocking::{Client, Response},
    redirect::Policy,
    StatusCode,
};
use serde_json::Value;

use crate::error::{Error, IoContext, Result};
use crate::io::pending::{write_atomic, PendingWrite};
use crate::misc::{cache_path, is_cached};

use super::{FetchConfig, Payload, Stream};

/// Blocking HTTP client. Each call is independent: no retries and no backoff.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

fn send_error(url: &str, e: reqwest::Error) -> Error {
    if e.is_connect() || e.is_timeout() {
        Error::Unreachable { url: url.to_string(), message: e.to_string() }
    } else if e.is_builder() {
        Error::invalid(format!("Invalid request for {url}: {e}"))
    } else {
        Error::Network { url: url.to_string(), message: e.to_string() }
    }
}

fn check_status(url: &str, resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    Err(Error::Status {
        url: url.to_string(),
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
    })
}

fn decode_json(url: &str, body: &[u8]) -> Result<Value> {
    serde_json::from_slice(body)
        .map_err(|e| Error::Malformed { url: url.to_string(), message: e.to_string() })
}

fn decode_text(url: &str, body: Vec<u8>) -> Result<String> {
    String::from_utf8(body)
        .map_err(|e| Error::Malformed { url: url.to_string(), message: e.to_string() })
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(Policy::limited(config.max_redirects))
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::invalid(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn send(&self, url: &str) -> Result<Response> {
        debug!("[online] GET {url}");
        let resp = self.client.get(url).send().map_err(|e| send_error(url, e))?;
        check_status(url, resp)
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self.send(url)?;
        let body = resp.bytes().map_err(|e| send_error(url, e))?;
        Ok(body.to_vec())
    }

    /// Body of a successful GET on `url`, served from the cache when enabled and fresh.
    pub fn get(&self, url: &str) -> Result<Vec<u8>> {
        let Some(cache) = &self.config.cache else { return self.fetch(url) };

        let path = cache_path(url, Some(&cache.store));
        if !cache.force && is_cached(&path, cache.expire)? {
            debug!("[online::cache] hit {url} -> {}", path.display());
            return std::fs::read(&path)
                .io_context(|| format!("[online::cache] Failed to read {}", path.display()));
        }
        debug!("[online::cache] miss {url}");
        let body = self.fetch(url)?;
        write_atomic(&path, &body)?;
        Ok(body)
    }

    /// Fetch `url` and decode the body as `stream`.
    pub fn read(&self, url: &str, stream: Stream) -> Result<Payload> {
        let body = self.get(url)?;
        Ok(match stream {
            Stream::Bytes => Payload::Bytes(body),
            Stream::Text => Payload::Text(decode_text(url, body)?),
            Stream::Json => Payload::Json(decode_json(url, &body)?),
        })
    }

    pub fn read_json(&self, url: &str) -> Result<Value> {
        decode_json(url, &self.get(url)?)
    }

    pub fn read_text(&self, url: &str) -> Result<String> {
        decode_text(url, self.get(url)?)
    }

    /// Stream `url` into `out`. Refuses to replace an existing file unless `force`.
    pub fn download(&self, url: &str, out: &Path, force: bool) -> Result<()> {
        // Safe big-file write (tempfile -> atomic rename)
        let mut sink = PendingWrite::open(out, force)?;
        let mut resp = self.send(url)?;

        let written = std::io::copy(&mut resp, &mut sink)
            .io_context(|| format!("[online::download] write {}", out.display()))?;
        sink.flush().io_context(|| format!("[online::download] flush {}", out.display()))?;
        sink.finalize()?;
        info!("[online::download] {url} -> {} ({written} bytes)", out.display());
        Ok(())
    }

    /// Lightweight existence check: `Ok(false)` on 404/410.
    pub fn exists(&self, url: &str) -> Result<bool> {
        // Try HEAD first
        if let Ok(resp) = self.client.head(url).send() {
            match resp.status() {
                StatusCode::OK => return Ok(true),
                StatusCode::NOT_FOUND | StatusCode::GONE => return Ok(false),
                // Some servers don't like HEAD; fall through to range GET.
                _ => {}
            }
        }

        // Fallback: GET first byte only
        let resp = self.client
            .get(url)
            .header(reqwest::header::RANGE, "bytes=0-0")
            .send()
            .map_err(|e| send_error(url, e))?;

        match resp.status() {
            StatusCode::OK | StatusCode::PARTIAL_CONTENT => Ok(true),
            StatusCode::NOT_FOUND | StatusCode::GONE => Ok(false),
            _ => check_status(url, resp).map(|_| true),
        }
    }
}
