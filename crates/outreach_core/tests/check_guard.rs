use outreach_core::{
    update, AppState, Effect, Msg, ProfileSignals, ScreenState, TabEvent, UserSettings,
};

const PROFILE: &str = "https://www.linkedin.com/in/janedoe/";
const OTHER_PROFILE: &str = "https://www.linkedin.com/in/johnroe/";

fn init_logging() {
    outreach_logging::initialize_for_tests();
}

fn configured() -> AppState {
    let settings = UserSettings {
        resume: "resume".to_string(),
        api_key: "sk-test-0123456789abcdef".to_string(),
    };
    update(AppState::new(), Msg::SettingsLoaded(Some(settings))).0
}

fn tab_updated(state: AppState, url: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::Tab(TabEvent::NavigationComplete {
            url: Some(url.to_string()),
        }),
    )
}

fn count_scrapes(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|effect| matches!(effect, Effect::Scrape { .. }))
        .count()
}

#[test]
fn duplicate_events_before_scrape_resolves_scrape_once() {
    init_logging();
    let (state, first) = tab_updated(configured(), PROFILE);
    let (state, second) = tab_updated(state, PROFILE);
    let (state, third) = update(
        state,
        Msg::Tab(TabEvent::Activated {
            url: Some(PROFILE.to_string()),
        }),
    );

    assert_eq!(count_scrapes(&first), 1);
    assert!(second.is_empty());
    assert!(third.is_empty());
    assert_eq!(state.screen(), ScreenState::Loading);
}

#[test]
fn guard_holds_until_release_after_settling() {
    init_logging();
    let (state, _) = tab_updated(configured(), PROFILE);
    let (state, effects) = update(
        state,
        Msg::ScrapeFinished {
            token: 1,
            result: Ok(ProfileSignals::new("Jane Doe", "Engineer", false)),
        },
    );
    let release_token = match effects.as_slice() {
        [Effect::ReleaseGuard { token, .. }] => *token,
        other => panic!("unexpected effects {other:?}"),
    };

    // Still inside the delay window: ignored, screen kept.
    let (state, effects) = tab_updated(state, PROFILE);
    assert!(effects.is_empty());
    assert_eq!(state.screen(), ScreenState::Profile);

    let (state, _) = update(
        state,
        Msg::GuardReleased {
            token: release_token,
        },
    );
    let (state, effects) = tab_updated(state, PROFILE);
    assert_eq!(count_scrapes(&effects), 1);
    assert_eq!(state.screen(), ScreenState::Loading);
}

#[test]
fn stale_scrape_result_is_discarded() {
    init_logging();
    let (state, _) = tab_updated(configured(), PROFILE);
    let (state, effects) = tab_updated(state, OTHER_PROFILE);
    assert_eq!(
        effects,
        vec![Effect::Scrape {
            token: 2,
            url: OTHER_PROFILE.to_string()
        }]
    );

    // The first scrape resolves late; it no longer owns the guard or the screen.
    let (state, effects) = update(
        state,
        Msg::ScrapeFinished {
            token: 1,
            result: Ok(ProfileSignals::new("Jane Doe", "Engineer", false)),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.screen(), ScreenState::Loading);
    assert!(state.profile().is_none());

    let (state, _) = update(
        state,
        Msg::ScrapeFinished {
            token: 2,
            result: Ok(ProfileSignals::new("John Roe", "Recruiter", true)),
        },
    );
    assert_eq!(state.screen(), ScreenState::Profile);
    assert_eq!(state.profile().map(ProfileSignals::name), Some("John Roe"));
}

#[test]
fn leaving_for_non_profile_invalidates_pending_scrape() {
    init_logging();
    let (state, _) = tab_updated(configured(), PROFILE);
    let (state, _) = tab_updated(state, "https://www.linkedin.com/feed/");
    assert_eq!(state.screen(), ScreenState::Success);

    let (state, _) = update(
        state,
        Msg::ScrapeFinished {
            token: 1,
            result: Ok(ProfileSignals::new("Jane Doe", "Engineer", false)),
        },
    );
    assert_eq!(state.screen(), ScreenState::Success);

    // Going back is a new check because the guard moved to the feed URL.
    let (_, effects) = tab_updated(state, PROFILE);
    assert_eq!(count_scrapes(&effects), 1);
}

#[test]
fn stale_release_does_not_clear_newer_guard() {
    init_logging();
    let (state, _) = tab_updated(configured(), "https://www.linkedin.com/feed/");
    let (state, _) = tab_updated(state, PROFILE);
    let (state, _) = update(state, Msg::GuardReleased { token: 1 });

    let (_, effects) = tab_updated(state, PROFILE);
    assert!(effects.is_empty());
}

#[test]
fn saving_settings_forces_a_fresh_check() {
    init_logging();
    let (state, _) = tab_updated(configured(), PROFILE);
    let (_, effects) = update(state, Msg::SettingsSaved(Ok(())));
    assert_eq!(
        effects,
        vec![Effect::Scrape {
            token: 2,
            url: PROFILE.to_string()
        }]
    );
}

#[test]
fn returning_from_blank_tab_rechecks_profile() {
    init_logging();
    let (state, first) = tab_updated(configured(), PROFILE);
    assert_eq!(count_scrapes(&first), 1);

    let (state, effects) = update(state, Msg::Tab(TabEvent::Activated { url: None }));
    assert!(effects.is_empty());
    assert_eq!(state.screen(), ScreenState::Success);

    let (state, effects) = update(
        state,
        Msg::Tab(TabEvent::Activated {
            url: Some(PROFILE.to_string()),
        }),
    );
    assert_eq!(
        effects,
        vec![Effect::Scrape {
            token: 2,
            url: PROFILE.to_string()
        }]
    );

    // The scrape from the first visit is stale and changes nothing.
    let (state, effects) = update(
        state,
        Msg::ScrapeFinished {
            token: 1,
            result: Ok(ProfileSignals::new("Jane Doe", "Engineer", false)),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.screen(), ScreenState::Loading);

    let (state, _) = update(
        state,
        Msg::ScrapeFinished {
            token: 2,
            result: Ok(ProfileSignals::new("Jane Doe", "Engineer", false)),
        },
    );
    assert_eq!(state.screen(), ScreenState::Profile);
    assert_eq!(state.profile().map(ProfileSignals::name), Some("Jane Doe"));
}
