use bytes::Bytes;

/// Mirrors the core's session token; the app maps between the two.
pub type SessionToken = u64;

/// One batch load: how many candidates and at what geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRequest {
    pub count: u32,
    pub width: u32,
    pub height: u32,
}

/// A generated candidate address, before any preload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateImage {
    pub index: u32,
    pub url: String,
}

/// One entry of a finished batch. `bytes` is `None` only on the all-failed
/// fallback path, where unverified addresses are handed through anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadedCard {
    pub index: u32,
    pub url: String,
    pub bytes: Option<Bytes>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// One preload attempt finished, successfully or not.
    AttemptFinished { session: SessionToken, ok: bool },
    /// The whole batch is done; cards are in generation order.
    BatchReady {
        session: SessionToken,
        cards: Vec<PreloadedCard>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreloadError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("request timed out")]
    Timeout,
    #[error("unsupported content type {0}")]
    UnsupportedContentType(String),
    #[error("empty response body")]
    EmptyBody,
    #[error("response too large (max {max_bytes} bytes)")]
    TooLarge { max_bytes: u64 },
    #[error("network error: {0}")]
    Network(String),
}
