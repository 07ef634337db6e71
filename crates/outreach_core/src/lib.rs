//! Outreach core: pure screen state machine and view-model helpers.
mod draft;
mod effect;
mod msg;
mod profile_url;
mod state;
mod update;
mod view_model;

pub use draft::{DraftFailure, DraftState, MessageKind, MessageRequest};
pub use effect::{Effect, GUARD_RELEASE_DELAY, JOBS_URL};
pub use msg::{Msg, TabEvent};
pub use profile_url::{is_profile_url, PROFILE_HOST, PROFILE_PATH_PREFIX};
pub use state::{
    validate_api_key, AppState, CheckToken, ProfileSignals, RequestId, ScreenState,
    UserSettings, MIN_API_KEY_LEN, API_KEY_PREFIX,
};
pub use update::update;
pub use view_model::{AppViewModel, DraftView, ProfileView};
