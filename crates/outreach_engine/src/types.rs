use std::fmt;

use serde::Serialize;

/// Generation number of one page check, issued by the panel core.
pub type CheckToken = u64;
/// Identifies one generation request.
pub type RequestId = u64;

/// Name, position and hiring verdict scraped from one profile page.
///
/// There are no setters: once built the verdict travels unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProfileSignals {
    name: String,
    position: String,
    is_hiring: bool,
}

impl ProfileSignals {
    pub fn new(name: impl Into<String>, position: impl Into<String>, is_hiring: bool) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            is_hiring,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn is_hiring(&self) -> bool {
        self.is_hiring
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Referral,
    Meeting,
    Connect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ScrapeCompleted {
        token: CheckToken,
        result: Result<ProfileSignals, ScrapeFailure>,
    },
    GuardReleased {
        token: CheckToken,
    },
    DraftCompleted {
        request_id: RequestId,
        result: Result<String, RequestError>,
    },
}

/// The page document could not be obtained. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScrapeFailure {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout")]
    Timeout,
    #[error("redirect limit exceeded")]
    RedirectLimitExceeded,
    #[error("response too large (max {max_bytes}, actual {actual:?})")]
    TooLarge { max_bytes: u64, actual: Option<u64> },
    #[error("unsupported content type {0}")]
    UnsupportedContentType(String),
    #[error("no document available: {0}")]
    Unavailable(String),
    #[error("network error: {0}")]
    Network(String),
}

/// Failures of one generation request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("quota exceeded")]
    QuotaExceeded,
    #[error("invalid api key")]
    InvalidApiKey,
    #[error("provider error: {0}")]
    Provider(String),
    #[error("malformed response")]
    MalformedResponse,
    #[error("network error: {0}")]
    Network(String),
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Referral => write!(f, "referral"),
            MessageKind::Meeting => write!(f, "meeting"),
            MessageKind::Connect => write!(f, "connect"),
        }
    }
}
