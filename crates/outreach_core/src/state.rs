use crate::view_model::{AppViewModel, DraftView, ProfileView};
use crate::{is_profile_url, DraftState, Effect, MessageKind, GUARD_RELEASE_DELAY};

/// Generation number identifying one page check.
pub type CheckToken = u64;
/// Identifies one generation request.
pub type RequestId = u64;

pub const API_KEY_PREFIX: &str = "sk-";
pub const MIN_API_KEY_LEN: usize = 20;

/// Cheap format check run before a key is stored or used.
pub fn validate_api_key(api_key: &str) -> Result<(), &'static str> {
    let key = api_key.trim();
    if key.is_empty() {
        return Err("API key is missing");
    }
    if !key.starts_with(API_KEY_PREFIX) {
        return Err("API key must start with \"sk-\"");
    }
    if key.chars().count() < MIN_API_KEY_LEN {
        return Err("API key is too short");
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenState {
    #[default]
    Setup,
    Loading,
    Success,
    Profile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSettings {
    pub resume: String,
    pub api_key: String,
}

impl UserSettings {
    /// Both secrets present.
    pub fn is_complete(&self) -> bool {
        !self.resume.trim().is_empty() && !self.api_key.trim().is_empty()
    }
}

/// Facts scraped from one profile page. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
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

/// The URL a check is (or was recently) running for.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CheckGuard {
    token: CheckToken,
    url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    settings: Option<UserSettings>,
    active_url: Option<String>,
    screen: ScreenState,
    profile: Option<ProfileSignals>,
    guard: Option<CheckGuard>,
    awaiting_scrape: Option<CheckToken>,
    last_token: CheckToken,
    draft: DraftState,
    awaiting_draft: Option<RequestId>,
    last_request_id: RequestId,
    setup_error: Option<String>,
    notice: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> ScreenState {
        self.screen
    }

    pub fn settings(&self) -> Option<&UserSettings> {
        self.settings.as_ref()
    }

    pub fn profile(&self) -> Option<&ProfileSignals> {
        self.profile.as_ref()
    }

    pub fn draft(&self) -> &DraftState {
        &self.draft
    }

    pub fn view(&self) -> AppViewModel {
        let profile = self.profile.as_ref().map(|signals| ProfileView {
            name: signals.name().to_string(),
            position: signals.position().to_string(),
            is_hiring: signals.is_hiring(),
            offered_kinds: offered_kinds(signals),
        });
        AppViewModel {
            screen: self.screen,
            active_url: self.active_url.clone(),
            profile,
            draft: draft_view(&self.draft),
            setup_error: self.setup_error.clone(),
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn set_screen(&mut self, screen: ScreenState) {
        if self.screen != screen {
            self.screen = screen;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_active_url(&mut self, url: Option<String>) {
        if self.active_url != url {
            self.active_url = url;
            self.mark_dirty();
        }
    }

    pub(crate) fn has_settings(&self) -> bool {
        self.settings.as_ref().is_some_and(UserSettings::is_complete)
    }

    pub(crate) fn store_settings(&mut self, settings: Option<UserSettings>) {
        self.settings = settings.filter(UserSettings::is_complete);
        self.setup_error = None;
        self.mark_dirty();
    }

    pub(crate) fn show_setup_error(&mut self, reason: impl Into<String>) {
        self.setup_error = Some(reason.into());
        self.set_screen(ScreenState::Setup);
        self.mark_dirty();
    }

    pub(crate) fn begin_saving(&mut self) {
        self.setup_error = None;
        self.set_screen(ScreenState::Loading);
    }

    /// Forget everything derived from the settings and the current page.
    pub(crate) fn forget_all(&mut self) {
        self.settings = None;
        self.guard = None;
        self.awaiting_scrape = None;
        self.clear_profile();
        self.set_screen(ScreenState::Setup);
        self.mark_dirty();
    }

    fn clear_profile(&mut self) {
        if self.profile.take().is_some() {
            self.mark_dirty();
        }
        self.reset_draft();
    }

    fn reset_draft(&mut self) {
        self.awaiting_draft = None;
        self.clear_notice();
        if self.draft != DraftState::Idle {
            self.draft = DraftState::Idle;
            self.mark_dirty();
        }
    }

    /// Re-derives the screen from settings and the active tab.
    ///
    /// With `force` unset, a URL that is still covered by the check guard is
    /// left alone.
    pub(crate) fn evaluate(&mut self, force: bool) -> Vec<Effect> {
        if !self.has_settings() {
            self.guard = None;
            self.awaiting_scrape = None;
            self.clear_profile();
            self.set_screen(ScreenState::Setup);
            return Vec::new();
        }

        let Some(url) = self.active_url.clone() else {
            self.guard = None;
            self.awaiting_scrape = None;
            self.clear_profile();
            self.set_screen(ScreenState::Success);
            return Vec::new();
        };

        if !force && self.guard.as_ref().is_some_and(|guard| guard.url == url) {
            return Vec::new();
        }

        self.last_token += 1;
        let token = self.last_token;
        self.guard = Some(CheckGuard {
            token,
            url: url.clone(),
        });
        self.clear_profile();

        if is_profile_url(&url) {
            self.awaiting_scrape = Some(token);
            self.set_screen(ScreenState::Loading);
            vec![Effect::Scrape { token, url }]
        } else {
            self.awaiting_scrape = None;
            self.set_screen(ScreenState::Success);
            vec![Effect::ReleaseGuard {
                token,
                after: GUARD_RELEASE_DELAY,
            }]
        }
    }

    /// Applies a settled scrape. Returns the guard release to schedule, if any.
    pub(crate) fn apply_scrape(
        &mut self,
        token: CheckToken,
        result: Result<ProfileSignals, String>,
    ) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.guard.as_ref().is_some_and(|guard| guard.token == token) {
            effects.push(Effect::ReleaseGuard {
                token,
                after: GUARD_RELEASE_DELAY,
            });
        }

        if self.awaiting_scrape != Some(token) {
            return effects;
        }
        self.awaiting_scrape = None;

        let signals = result.unwrap_or_default();
        if signals.name().is_empty() {
            self.set_screen(ScreenState::Success);
        } else {
            self.profile = Some(signals);
            self.mark_dirty();
            self.set_screen(ScreenState::Profile);
        }
        effects
    }

    pub(crate) fn release_guard(&mut self, token: CheckToken) {
        if self.guard.as_ref().is_some_and(|guard| guard.token == token) {
            self.guard = None;
        }
    }

    /// Starts a draft request for the current profile, if one is shown.
    pub(crate) fn begin_draft(&mut self, kind: MessageKind) -> Option<Effect> {
        if self.screen != ScreenState::Profile {
            return None;
        }
        let settings = self.settings.as_ref()?;
        let signals = self.profile.as_ref()?;
        let request = crate::MessageRequest {
            signals: signals.clone(),
            resume: settings.resume.clone(),
            kind,
        };
        let api_key = settings.api_key.clone();

        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.awaiting_draft = Some(request_id);
        self.draft = DraftState::Generating { kind };
        self.clear_notice();
        self.mark_dirty();
        Some(Effect::RequestMessage {
            request_id,
            api_key,
            request,
        })
    }

    /// Copies a finished draft. Anything else only earns a notice.
    pub(crate) fn copy_draft(&mut self) -> Option<Effect> {
        match &self.draft {
            DraftState::Ready { text, .. } => Some(Effect::CopyToClipboard(text.clone())),
            _ => {
                self.set_notice("Nothing to copy yet.");
                None
            }
        }
    }

    pub(crate) fn set_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(text.into());
        self.mark_dirty();
    }

    fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_draft(
        &mut self,
        request_id: RequestId,
        result: Result<String, crate::DraftFailure>,
    ) {
        if self.awaiting_draft != Some(request_id) {
            return;
        }
        let Some(kind) = self.draft.kind() else {
            return;
        };
        self.awaiting_draft = None;
        self.draft = match result {
            Ok(text) => DraftState::Ready { kind, text },
            Err(failure) => DraftState::Failed { kind, failure },
        };
        self.mark_dirty();
    }
}

/// Hiring contacts get referral and meeting asks; everyone else a connection note.
fn offered_kinds(signals: &ProfileSignals) -> Vec<MessageKind> {
    if signals.is_hiring() {
        vec![MessageKind::Referral, MessageKind::Meeting]
    } else {
        vec![MessageKind::Connect]
    }
}

fn draft_view(draft: &DraftState) -> Option<DraftView> {
    match draft {
        DraftState::Idle => None,
        DraftState::Generating { kind } => Some(DraftView {
            kind: *kind,
            text: "Generating message...".to_string(),
            busy: true,
            is_error: false,
        }),
        DraftState::Ready { kind, text } => Some(DraftView {
            kind: *kind,
            text: text.clone(),
            busy: false,
            is_error: false,
        }),
        DraftState::Failed { kind, failure } => Some(DraftView {
            kind: *kind,
            text: failure.user_text(),
            busy: false,
            is_error: true,
        }),
    }
}
