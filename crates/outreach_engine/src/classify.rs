use outreach_logging::{outreach_debug, outreach_warn};
use scraper::Html;
use serde::Serialize;

use crate::selectors::SelectorChain;

pub const HIRING_BADGE_SELECTORS: &[&str] = &[
    ".hiring-badge",
    "[class*=\"hiring-badge\"]",
    ".pv-top-card-profile-picture__container .member-36",
    "img[alt*=\"#HIRING\"]",
    ".pv-top-card__photo-wrapper [class*=\"member\"]",
];

/// Header fragments scanned for hiring phrases; the document title comes last.
pub const HEADER_SELECTORS: &[&str] = &[
    ".pv-text-details__left-panel",
    ".top-card-layout__headline",
    ".profile-topcard-person-entity__content",
    "title",
];

pub const OPEN_TO_WORK_SELECTORS: &[&str] = &[
    "[class*=\"open-to-work-badge\"]",
    ".pv-top-card--open-to-work-badge",
    ".profile-topcard__open-to-work-badge",
];

pub const HIRING_SECTION_SELECTORS: &[&str] = &[
    "[data-test-id*=\"hiring\"]",
    "[data-control-name*=\"hiring\"]",
    "[data-test-id=\"jobs-tab\"]",
];

pub const HIRING_KEYWORDS: &[&str] = &[
    "hiring",
    "recruiting",
    "looking for",
    "open position",
    "open role",
    "job opening",
    "we're hiring",
    "join our team",
    "career opportunity",
];

pub const RECRUITER_ROLE_MARKERS: &[&str] = &["recruit", "talent", "hiring", "hr"];

/// Each weak hiring indicator, evaluated independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HiringSignals {
    pub hiring_badge: bool,
    pub header_keyword: bool,
    pub recruiter_role: bool,
    /// A job seeker marker. It still counts towards the verdict.
    pub open_to_work: bool,
    pub hiring_section: bool,
}

impl HiringSignals {
    /// Any positive signal means hiring.
    pub fn is_hiring(&self) -> bool {
        self.hiring_badge
            || self.header_keyword
            || self.recruiter_role
            || self.open_to_work
            || self.hiring_section
    }

    /// True when the verdict rests on the open-to-work badge alone.
    pub fn only_open_to_work(&self) -> bool {
        self.open_to_work
            && !(self.hiring_badge || self.header_keyword || self.recruiter_role || self.hiring_section)
    }
}

#[derive(Debug, Clone)]
pub struct HiringClassifier {
    badge: SelectorChain,
    header: SelectorChain,
    open_to_work: SelectorChain,
    hiring_section: SelectorChain,
    keywords: Vec<String>,
    role_markers: Vec<String>,
}

impl Default for HiringClassifier {
    fn default() -> Self {
        Self {
            badge: SelectorChain::new(HIRING_BADGE_SELECTORS),
            header: SelectorChain::new(HEADER_SELECTORS),
            open_to_work: SelectorChain::new(OPEN_TO_WORK_SELECTORS),
            hiring_section: SelectorChain::new(HIRING_SECTION_SELECTORS),
            keywords: HIRING_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            role_markers: RECRUITER_ROLE_MARKERS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl HiringClassifier {
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords
            .into_iter()
            .map(|k| k.into().to_lowercase())
            .collect();
        self
    }

    pub fn signals(&self, doc: &Html, position: &str) -> HiringSignals {
        let header_text = self.header.first_texts(doc).join(" ");
        let signals = HiringSignals {
            hiring_badge: self.badge.any_present(doc),
            header_keyword: contains_any(&header_text, &self.keywords),
            recruiter_role: contains_any(position, &self.role_markers),
            open_to_work: self.open_to_work.any_present(doc),
            hiring_section: self.hiring_section.any_present(doc),
        };
        outreach_debug!("Hiring signals: {:?}", signals);
        if signals.only_open_to_work() {
            outreach_warn!("Hiring verdict rests only on an open-to-work badge");
        }
        signals
    }

    pub fn classify(&self, doc: &Html, position: &str) -> bool {
        self.signals(doc, position).is_hiring()
    }
}

/// Case-insensitive substring scan; typographic apostrophes count as plain ones.
fn contains_any(text: &str, needles: &[String]) -> bool {
    let haystack = text.to_lowercase().replace('\u{2019}', "'");
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}
