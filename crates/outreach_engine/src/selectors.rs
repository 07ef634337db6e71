use outreach_logging::{outreach_debug, outreach_trace, outreach_warn};
use scraper::{ElementRef, Html, Selector};

/// Ordered CSS selector patterns tried one after another.
///
/// Only the first element matching each pattern is considered, the way a
/// page script's `querySelector` would see it. Patterns that fail to parse
/// are dropped when the chain is built.
#[derive(Debug, Clone)]
pub struct SelectorChain {
    entries: Vec<(String, Selector)>,
}

impl SelectorChain {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = patterns
            .into_iter()
            .filter_map(|pattern| {
                let pattern = pattern.as_ref();
                match Selector::parse(pattern) {
                    Ok(selector) => Some((pattern.to_string(), selector)),
                    Err(err) => {
                        outreach_warn!("Dropping unparsable selector {:?}: {}", pattern, err);
                        None
                    }
                }
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(pattern, _)| pattern.as_str())
    }

    /// Text of the first pattern whose first match is non-empty and accepted.
    pub fn first_text(&self, doc: &Html, accept: impl Fn(&str) -> bool) -> Option<String> {
        self.entries.iter().find_map(|(pattern, selector)| {
            let Some(text) = doc.select(selector).next().map(element_text) else {
                outreach_trace!("Selector {:?}: not found", pattern);
                return None;
            };
            if text.is_empty() || !accept(&text) {
                outreach_trace!("Selector {:?}: skipped {:?}", pattern, text);
                return None;
            }
            outreach_debug!("Selector {:?}: matched", pattern);
            Some(text)
        })
    }

    /// First-match text of every pattern, in order, skipping patterns with no match.
    pub fn first_texts(&self, doc: &Html) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|(_, selector)| doc.select(selector).next().map(element_text))
            .collect()
    }

    /// Existence check across all patterns.
    pub fn any_present(&self, doc: &Html) -> bool {
        self.entries.iter().any(|(pattern, selector)| {
            let found = doc.select(selector).next().is_some();
            if found {
                outreach_debug!("Marker {:?}: present", pattern);
            }
            found
        })
    }
}

/// Concatenated descendant text, trimmed.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
