use outreach_logging::outreach_info;
use scraper::Html;
use serde::Serialize;

use crate::classify::{HiringClassifier, HiringSignals};
use crate::selectors::SelectorChain;
use crate::ProfileSignals;

pub const NAME_SELECTORS: &[&str] = &[
    "h1.break-words",
    ".artdeco-hoverable-trigger h1",
    "[class*=\"break-words\"] h1",
    "h1.text-heading-xlarge",
    "h1.inline.t-24.t-black.t-normal.break-words",
    ".pv-text-details__left-panel h1",
];

pub const POSITION_SELECTORS: &[&str] = &[
    "[class*=\"text-body-medium\"]",
    "[class*=\"break-words\"][class*=\"text-body\"]",
    "div.text-body-medium.break-words",
    ".pv-text-details__left-panel .text-body-medium",
    "div[aria-label=\"Current company\"]",
    ".pv-text-details__right-panel .text-body-small.text-color-text-secondary",
];

/// Signals plus the breakdown behind the hiring verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileReport {
    pub signals: ProfileSignals,
    pub hiring: HiringSignals,
}

pub trait Extractor: Send + Sync {
    fn inspect(&self, html: &str) -> ProfileReport;

    fn extract(&self, html: &str) -> ProfileSignals {
        self.inspect(html).signals
    }
}

/// Selector-driven extractor for rendered LinkedIn profile pages.
///
/// Name and position come from ordered fallback chains; the hiring verdict
/// comes from [`HiringClassifier`]. Unmatched fields are empty strings.
#[derive(Debug, Clone)]
pub struct LinkedInExtractor {
    name: SelectorChain,
    position: SelectorChain,
    classifier: HiringClassifier,
}

impl Default for LinkedInExtractor {
    fn default() -> Self {
        Self {
            name: SelectorChain::new(NAME_SELECTORS),
            position: SelectorChain::new(POSITION_SELECTORS),
            classifier: HiringClassifier::default(),
        }
    }
}

impl LinkedInExtractor {
    pub fn with_name_selectors<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.name = SelectorChain::new(patterns);
        self
    }

    pub fn with_position_selectors<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.position = SelectorChain::new(patterns);
        self
    }

    pub fn with_classifier(mut self, classifier: HiringClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn inspect_document(&self, doc: &Html) -> ProfileReport {
        let name = self.name.first_text(doc, |_| true).unwrap_or_default();
        let position = self
            .position
            .first_text(doc, |text| !starts_with_digit(text))
            .unwrap_or_default();
        let hiring = self.classifier.signals(doc, &position);

        outreach_info!(
            "Extracted profile name_len={} position_len={} hiring={}",
            name.len(),
            position.len(),
            hiring.is_hiring()
        );
        ProfileReport {
            signals: ProfileSignals::new(name, position, hiring.is_hiring()),
            hiring,
        }
    }
}

impl Extractor for LinkedInExtractor {
    fn inspect(&self, html: &str) -> ProfileReport {
        let doc = Html::parse_document(html);
        self.inspect_document(&doc)
    }
}

/// Connection counts ("500+ connections") sit in the same slots as job titles.
fn starts_with_digit(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_ascii_digit())
}
