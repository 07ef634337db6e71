use crate::{validate_api_key, AppState, Effect, Msg, UserSettings, JOBS_URL};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SettingsLoaded(settings) => {
            state.store_settings(settings);
            state.evaluate(true)
        }
        Msg::SetupSubmitted { resume, api_key } => {
            let resume = resume.trim().to_string();
            let api_key = api_key.trim().to_string();
            if resume.is_empty() || api_key.is_empty() {
                state.show_setup_error("Please provide both a resume and an API key");
                return (state, Vec::new());
            }
            if let Err(reason) = validate_api_key(&api_key) {
                state.show_setup_error(reason);
                return (state, Vec::new());
            }
            let settings = UserSettings { resume, api_key };
            state.store_settings(Some(settings.clone()));
            state.begin_saving();
            vec![Effect::SaveSettings(settings)]
        }
        Msg::SettingsSaved(Ok(())) => state.evaluate(true),
        Msg::SettingsSaved(Err(reason)) => {
            state.forget_all();
            state.show_setup_error(format!("Could not save your settings: {reason}"));
            Vec::new()
        }
        Msg::ResetClicked => {
            state.forget_all();
            vec![Effect::ClearSettings]
        }
        Msg::Tab(event) => {
            let url = event
                .url()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(ToOwned::to_owned);
            state.set_active_url(url);
            state.evaluate(false)
        }
        Msg::ScrapeFinished { token, result } => state.apply_scrape(token, result),
        Msg::GuardReleased { token } => {
            state.release_guard(token);
            Vec::new()
        }
        Msg::GenerateClicked(kind) => state.begin_draft(kind).into_iter().collect(),
        Msg::RegenerateClicked => match state.draft().kind() {
            Some(kind) => state.begin_draft(kind).into_iter().collect(),
            None => Vec::new(),
        },
        Msg::DraftFinished { request_id, result } => {
            state.apply_draft(request_id, result);
            Vec::new()
        }
        Msg::CopyClicked => state.copy_draft().into_iter().collect(),
        Msg::Copied(result) => {
            match result {
                Ok(()) => state.set_notice("Copied!"),
                Err(reason) => state.set_notice(format!("Could not copy the message: {reason}")),
            }
            Vec::new()
        }
        Msg::OpenJobsClicked => vec![Effect::OpenUrl(JOBS_URL.to_string())],
        Msg::JobsOpened(result) => {
            match result {
                Ok(()) => state.set_notice("Opened LinkedIn jobs in your browser."),
                Err(reason) => state.set_notice(format!("Could not open LinkedIn: {reason}")),
            }
            Vec::new()
        }
    };

    (state, effects)
}
