use crate::{MessageKind, ScreenState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub screen: ScreenState,
    pub active_url: Option<String>,
    pub profile: Option<ProfileView>,
    pub draft: Option<DraftView>,
    pub setup_error: Option<String>,
    /// One-line acknowledgement of the last copy or browser action.
    pub notice: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub name: String,
    pub position: String,
    pub is_hiring: bool,
    /// Draft buttons shown for this profile.
    pub offered_kinds: Vec<MessageKind>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftView {
    pub kind: MessageKind,
    pub text: String,
    /// A request is in flight; the text is a placeholder.
    pub busy: bool,
    pub is_error: bool,
}
