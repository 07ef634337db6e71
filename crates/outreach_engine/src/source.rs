use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use outreach_logging::{outreach_debug, outreach_warn};
use reqwest::header::CONTENT_TYPE;

use crate::decode::decode_document;
use crate::ScrapeFailure;

/// Produces the rendered document of a tab, the only way analysis touches page content.
#[async_trait::async_trait]
pub trait DocumentSource: Send + Sync {
    async fn document(&self, url: &str) -> Result<String, ScrapeFailure>;
}

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec![
                "text/html".to_string(),
                "application/xhtml+xml".to_string(),
            ],
            user_agent: concat!("outreach/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Fetches the page over HTTP and decodes it.
#[derive(Debug, Clone)]
pub struct HttpDocumentSource {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl HttpDocumentSource {
    pub fn new(settings: FetchSettings) -> Result<Self, ScrapeFailure> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| ScrapeFailure::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    fn too_large(&self, actual: u64) -> ScrapeFailure {
        ScrapeFailure::TooLarge {
            max_bytes: self.settings.max_bytes,
            actual: Some(actual),
        }
    }
}

#[async_trait::async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn document(&self, url: &str) -> Result<String, ScrapeFailure> {
        let parsed =
            reqwest::Url::parse(url).map_err(|err| ScrapeFailure::InvalidUrl(err.to_string()))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeFailure::HttpStatus(status.as_u16()));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);
        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(ScrapeFailure::UnsupportedContentType(ct.to_string()));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        let decoded = decode_document(&bytes, content_type.as_deref());
        if decoded.lossy {
            outreach_warn!("Lossy decode of {} as {}", url, decoded.encoding_label);
        }
        outreach_debug!(
            "Fetched {} bytes from {} ({})",
            bytes.len(),
            url,
            decoded.encoding_label
        );
        Ok(decoded.html)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ScrapeFailure {
    if err.is_timeout() {
        return ScrapeFailure::Timeout;
    }
    if err.is_redirect() {
        return ScrapeFailure::RedirectLimitExceeded;
    }
    ScrapeFailure::Network(err.to_string())
}

/// Serves saved page snapshots from a directory.
///
/// `https://www.linkedin.com/in/janedoe/` is answered with `<dir>/janedoe.html`.
#[derive(Debug, Clone)]
pub struct SnapshotDocumentSource {
    dir: PathBuf,
}

impl SnapshotDocumentSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn snapshot_path(&self, url: &str) -> Result<PathBuf, ScrapeFailure> {
        let parsed =
            url::Url::parse(url).map_err(|err| ScrapeFailure::InvalidUrl(err.to_string()))?;
        let slug = parsed
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .filter(|slug| !slug.contains(['/', '\\']) && *slug != "..")
            .ok_or_else(|| ScrapeFailure::Unavailable(format!("no page name in {url}")))?;
        Ok(self.dir.join(format!("{slug}.html")))
    }
}

#[async_trait::async_trait]
impl DocumentSource for SnapshotDocumentSource {
    async fn document(&self, url: &str) -> Result<String, ScrapeFailure> {
        let path = self.snapshot_path(url)?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|err| ScrapeFailure::Unavailable(format!("{}: {err}", path.display())))?;
        outreach_debug!("Loaded snapshot {:?} for {}", path, url);
        Ok(decode_document(&bytes, None).html)
    }
}
