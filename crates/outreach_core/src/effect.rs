use std::time::Duration;

use crate::{CheckToken, MessageRequest, RequestId, UserSettings};

/// How long a settled check keeps suppressing events for the same URL.
pub const GUARD_RELEASE_DELAY: Duration = Duration::from_secs(1);

pub const JOBS_URL: &str = "https://www.linkedin.com/jobs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Persist the settings record (resume, key, save timestamp).
    SaveSettings(UserSettings),
    /// Erase the persisted settings record entirely.
    ClearSettings,
    /// Scrape the document at `url` and answer with `Msg::ScrapeFinished`.
    Scrape { token: CheckToken, url: String },
    /// Answer with `Msg::GuardReleased` once `after` has elapsed.
    ReleaseGuard { token: CheckToken, after: Duration },
    /// Send one generation request and answer with `Msg::DraftFinished`.
    RequestMessage {
        request_id: RequestId,
        api_key: String,
        request: MessageRequest,
    },
    /// Put `text` on the system clipboard and answer with `Msg::Copied`.
    CopyToClipboard(String),
    /// Open `url` in the default browser and answer with `Msg::JobsOpened`.
    OpenUrl(String),
}
