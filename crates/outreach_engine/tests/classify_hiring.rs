use outreach_engine::{HiringClassifier, HiringSignals};
use scraper::Html;

fn doc(body: &str) -> Html {
    Html::parse_document(&format!(
        "<html><head><title>Profile | LinkedIn</title></head><body>{body}</body></html>"
    ))
}

#[test]
fn plain_profile_is_not_hiring() {
    let page = doc(r#"<div class="pv-text-details__left-panel"><h1>Jane</h1></div>"#);
    let classifier = HiringClassifier::default();
    assert_eq!(
        classifier.signals(&page, "Software Engineer"),
        HiringSignals::default()
    );
    assert!(!classifier.classify(&page, "Software Engineer"));
}

#[test]
fn each_signal_alone_is_enough() {
    let classifier = HiringClassifier::default();
    let cases = [
        (r#"<div class="hiring-badge"></div>"#, ""),
        (r#"<img alt="Jane is #HIRING" src="x.png">"#, ""),
        (
            r#"<div class="top-card-layout__headline">Join our team at Acme</div>"#,
            "",
        ),
        ("", "Talent Acquisition Lead"),
        (r#"<span class="profile-topcard__open-to-work-badge"></span>"#, ""),
        (r#"<a data-control-name="hiring_card">Jobs</a>"#, ""),
        (r#"<li data-test-id="jobs-tab">Jobs</li>"#, ""),
    ];
    for (body, position) in cases {
        assert!(
            classifier.classify(&doc(body), position),
            "body {body:?} position {position:?}"
        );
    }
}

#[test]
fn title_text_counts_as_header() {
    let page = Html::parse_document(
        "<html><head><title>We're hiring | Jane Doe | LinkedIn</title></head><body></body></html>",
    );
    let signals = HiringClassifier::default().signals(&page, "");
    assert!(signals.header_keyword);
}

#[test]
fn keywords_outside_header_are_ignored() {
    let page = doc(r#"<section class="about">We are hiring a lot this year</section>"#);
    assert!(!HiringClassifier::default().classify(&page, "Engineer"));
}

#[test]
fn open_to_work_alone_is_flagged() {
    let page = doc(r#"<div class="some-open-to-work-badge-wrapper"></div>"#);
    let signals = HiringClassifier::default().signals(&page, "Engineer");
    assert!(signals.is_hiring());
    assert!(signals.only_open_to_work());
}

#[test]
fn verdict_is_monotonic_in_every_signal() {
    // Walk every combination; flipping any signal on never turns a yes into a no.
    for mask in 0u8..32 {
        let base = signals_from_mask(mask);
        for bit in 0..5 {
            let raised = signals_from_mask(mask | (1 << bit));
            if base.is_hiring() {
                assert!(raised.is_hiring(), "mask {mask:#07b} bit {bit}");
            }
        }
        assert_eq!(base.is_hiring(), mask != 0);
    }
}

#[test]
fn adding_markup_never_removes_hiring() {
    let classifier = HiringClassifier::default();
    let fragments = [
        r#"<div class="hiring-badge"></div>"#,
        r#"<div class="pv-text-details__left-panel">Recruiting engineers</div>"#,
        r#"<div class="pv-top-card--open-to-work-badge"></div>"#,
        r#"<div data-test-id="hiring-panel"></div>"#,
    ];
    let mut body = String::new();
    let mut was_hiring = false;
    for fragment in fragments {
        body.push_str(fragment);
        let now = classifier.classify(&doc(&body), "Engineer");
        assert!(now || !was_hiring);
        was_hiring = now;
    }
    assert!(was_hiring);
}

#[test]
fn custom_keywords_replace_defaults() {
    let classifier = HiringClassifier::default().with_keywords(["Wir Stellen Ein"]);
    let page = doc(r#"<div class="top-card-layout__headline">wir stellen ein!</div>"#);
    assert!(classifier.classify(&page, ""));
    let page = doc(r#"<div class="top-card-layout__headline">Hiring now</div>"#);
    assert!(!classifier.classify(&page, ""));
}

fn signals_from_mask(mask: u8) -> HiringSignals {
    HiringSignals {
        hiring_badge: mask & 1 != 0,
        header_keyword: mask & 2 != 0,
        recruiter_role: mask & 4 != 0,
        open_to_work: mask & 8 != 0,
        hiring_section: mask & 16 != 0,
    }
}
