use crate::{CheckToken, DraftFailure, MessageKind, ProfileSignals, RequestId, UserSettings};

/// Browser tab lifecycle signals the panel reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabEvent {
    /// The user switched to another tab.
    Activated { url: Option<String> },
    /// The active tab finished loading a page.
    NavigationComplete { url: Option<String> },
}

impl TabEvent {
    pub fn url(&self) -> Option<&str> {
        match self {
            TabEvent::Activated { url } | TabEvent::NavigationComplete { url } => url.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Settings record read from storage when the panel opens.
    SettingsLoaded(Option<UserSettings>),
    /// User submitted the setup form.
    SetupSubmitted { resume: String, api_key: String },
    /// Storage finished writing the settings record.
    SettingsSaved(Result<(), String>),
    /// User clicked "Start over".
    ResetClicked,
    /// Tab activated or finished navigating.
    Tab(TabEvent),
    /// Scrape of the active tab settled.
    ScrapeFinished {
        token: CheckToken,
        result: Result<ProfileSignals, String>,
    },
    /// The guard delay for a settled check elapsed.
    GuardReleased { token: CheckToken },
    /// User asked for a draft of the given kind.
    GenerateClicked(MessageKind),
    /// User asked for another draft of the last kind.
    RegenerateClicked,
    /// Generation request settled.
    DraftFinished {
        request_id: RequestId,
        result: Result<String, DraftFailure>,
    },
    /// User asked to copy the finished draft.
    CopyClicked,
    /// Clipboard write settled.
    Copied(Result<(), String>),
    /// User asked to browse LinkedIn jobs.
    OpenJobsClicked,
    /// Browser launch settled.
    JobsOpened(Result<(), String>),
}
