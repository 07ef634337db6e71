use outreach_core::{AppViewModel, DraftView, ProfileView, ScreenState};

const RULE: &str = "----------------------------------------";

/// Lines making up the panel for one view.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![RULE.to_string()];

    match view.screen {
        ScreenState::Setup => {
            lines.push("Welcome! Save your resume and API key to get started.".to_string());
            lines.push("  setup <resume-file> <api-key>".to_string());
            if let Some(error) = &view.setup_error {
                lines.push(format!("! {error}"));
            }
        }
        ScreenState::Loading => {
            lines.push("Loading...".to_string());
        }
        ScreenState::Success => {
            lines.push("You're all set.".to_string());
            lines.push("Open a LinkedIn profile to draft a message.".to_string());
            if let Some(url) = &view.active_url {
                lines.push(format!("Current page: {url}"));
            }
            lines.push("(jobs to browse LinkedIn jobs)".to_string());
        }
        ScreenState::Profile => match &view.profile {
            Some(profile) => render_profile(profile, view.draft.as_ref(), &mut lines),
            None => lines.push("Profile details are unavailable.".to_string()),
        },
    }

    if let Some(notice) = &view.notice {
        lines.push(format!("* {notice}"));
    }
    if view.screen != ScreenState::Setup {
        lines.push("(reset to start over)".to_string());
    }
    lines.push(RULE.to_string());
    lines
}

fn render_profile(profile: &ProfileView, draft: Option<&DraftView>, lines: &mut Vec<String>) {
    let name = profile.name.as_str();
    lines.push(format!("Name:     {name}"));
    if !profile.position.is_empty() {
        lines.push(format!("Position: {}", profile.position));
    }
    lines.push(if profile.is_hiring {
        format!("{name} appears to be hiring.")
    } else {
        format!("{name} does not appear to be hiring.")
    });

    let kinds: Vec<&str> = profile.offered_kinds.iter().map(|kind| kind.label()).collect();
    lines.push(format!("Draft: {}", kinds.join(" | ")));

    if let Some(draft) = draft {
        lines.push(String::new());
        let heading = if draft.is_error {
            format!("[{}] failed:", draft.kind.label())
        } else {
            format!("[{}]", draft.kind.label())
        };
        lines.push(heading);
        lines.extend(draft.text.lines().map(|line| format!("  {line}")));
        if !draft.busy && !draft.is_error {
            lines.push("(copy to clipboard, regenerate for another version)".to_string());
        } else if draft.is_error {
            lines.push("(regenerate to try again)".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outreach_core::MessageKind;

    fn profile_view(is_hiring: bool, draft: Option<DraftView>) -> AppViewModel {
        let offered_kinds = if is_hiring {
            vec![MessageKind::Referral, MessageKind::Meeting]
        } else {
            vec![MessageKind::Connect]
        };
        AppViewModel {
            screen: ScreenState::Profile,
            active_url: Some("https://www.linkedin.com/in/jane/".into()),
            profile: Some(ProfileView {
                name: "Jane Doe".into(),
                position: "Talent Partner".into(),
                is_hiring,
                offered_kinds,
            }),
            draft,
            setup_error: None,
            notice: None,
            dirty: true,
        }
    }

    #[test]
    fn setup_screen_shows_validation_error() {
        let view = AppViewModel {
            setup_error: Some("API key is too short".into()),
            ..AppViewModel::default()
        };
        let text = render(&view).join("\n");
        assert!(text.contains("setup <resume-file> <api-key>"));
        assert!(text.contains("! API key is too short"));
        assert!(!text.contains("start over"));
    }

    #[test]
    fn hiring_profile_offers_referral_and_meeting() {
        let text = render(&profile_view(true, None)).join("\n");
        assert!(text.contains("Name:     Jane Doe"));
        assert!(text.contains("Position: Talent Partner"));
        assert!(text.contains("Jane Doe appears to be hiring."));
        assert!(text.contains("Draft: referral | meeting"));
    }

    #[test]
    fn non_hiring_profile_offers_connect() {
        let text = render(&profile_view(false, None)).join("\n");
        assert!(text.contains("does not appear to be hiring"));
        assert!(text.contains("Draft: connect"));
    }

    #[test]
    fn draft_text_is_indented_and_errors_are_marked() {
        let ready = DraftView {
            kind: MessageKind::Referral,
            text: "Hi Jane,\nThanks!".into(),
            busy: false,
            is_error: false,
        };
        let lines = render(&profile_view(true, Some(ready)));
        assert!(lines.contains(&"[referral]".to_string()));
        assert!(lines.contains(&"  Hi Jane,".to_string()));
        assert!(lines.contains(&"  Thanks!".to_string()));

        let failed = DraftView {
            kind: MessageKind::Meeting,
            text: "Your API quota is exhausted.".into(),
            busy: false,
            is_error: true,
        };
        let lines = render(&profile_view(true, Some(failed)));
        assert!(lines.contains(&"[meeting] failed:".to_string()));
    }

    #[test]
    fn notice_is_shown_under_the_draft() {
        let ready = DraftView {
            kind: MessageKind::Connect,
            text: "Hi Jane".into(),
            busy: false,
            is_error: false,
        };
        let view = AppViewModel {
            notice: Some("Copied!".into()),
            ..profile_view(false, Some(ready))
        };
        let lines = render(&view);
        let draft_at = lines.iter().position(|l| l == "  Hi Jane").unwrap();
        let notice_at = lines.iter().position(|l| l == "* Copied!").unwrap();
        assert!(notice_at > draft_at);
        assert!(lines.contains(&"(copy to clipboard, regenerate for another version)".to_string()));

        let failed = AppViewModel {
            screen: ScreenState::Success,
            notice: Some("Could not open LinkedIn: no browser found".into()),
            ..AppViewModel::default()
        };
        assert!(render(&failed).contains(&"* Could not open LinkedIn: no browser found".to_string()));
    }

    #[test]
    fn success_screen_names_current_page() {
        let view = AppViewModel {
            screen: ScreenState::Success,
            active_url: Some("https://example.com/".into()),
            ..AppViewModel::default()
        };
        let text = render(&view).join("\n");
        assert!(text.contains("Open a LinkedIn profile"));
        assert!(text.contains("Current page: https://example.com/"));
    }
}
