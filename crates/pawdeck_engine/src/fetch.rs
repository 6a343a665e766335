use std::time::Duration;

use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;

use crate::{CandidateImage, EngineEvent, PreloadError};

#[derive(Debug, Clone)]
pub struct PreloadSettings {
    pub connect_timeout: Duration,
    /// Outer per-attempt deadline; a slow transfer counts as a failure but
    /// is not actively aborted beyond dropping the attempt.
    pub attempt_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for PreloadSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            attempt_timeout: Duration::from_millis(7000),
            max_bytes: 8 * 1024 * 1024,
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// One preload attempt: fetch an address, succeed iff it yields image bytes.
#[async_trait::async_trait]
pub trait Preloader: Send + Sync {
    async fn preload(&self, candidate: &CandidateImage) -> Result<Bytes, PreloadError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestPreloader {
    client: reqwest::Client,
    settings: PreloadSettings,
}

impl ReqwestPreloader {
    pub fn new(settings: PreloadSettings) -> Result<Self, PreloadError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.attempt_timeout)
            .build()
            .map_err(|err| PreloadError::Network(err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn is_content_type_plausible(content_type: &str) -> bool {
        let ct = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim();
        if ct.is_empty() || ct.eq_ignore_ascii_case("application/octet-stream") {
            return true;
        }
        ct.to_ascii_lowercase().starts_with("image/")
    }
}

#[async_trait::async_trait]
impl Preloader for ReqwestPreloader {
    async fn preload(&self, candidate: &CandidateImage) -> Result<Bytes, PreloadError> {
        let parsed = reqwest::Url::parse(&candidate.url)
            .map_err(|err| PreloadError::InvalidUrl(err.to_string()))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PreloadError::HttpStatus(status.as_u16()));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(PreloadError::TooLarge {
                    max_bytes: self.settings.max_bytes,
                });
            }
        }

        if let Some(ct) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            if !Self::is_content_type_plausible(ct) {
                return Err(PreloadError::UnsupportedContentType(ct.to_string()));
            }
        }

        let mut bytes = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if bytes.len() as u64 + chunk.len() as u64 > self.settings.max_bytes {
                return Err(PreloadError::TooLarge {
                    max_bytes: self.settings.max_bytes,
                });
            }
            bytes.extend_from_slice(&chunk);
        }

        if bytes.is_empty() {
            return Err(PreloadError::EmptyBody);
        }

        Ok(bytes.freeze())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> PreloadError {
    if err.is_timeout() {
        return PreloadError::Timeout;
    }
    PreloadError::Network(err.to_string())
}
