use std::sync::Arc;

use outreach_logging::{outreach_info, outreach_warn};

use crate::extract::Extractor;
use crate::source::DocumentSource;
use crate::{ProfileSignals, ScrapeFailure};

/// Pulls a tab's document through a [`DocumentSource`] and extracts its signals.
#[derive(Clone)]
pub struct ProfileScraper {
    source: Arc<dyn DocumentSource>,
    extractor: Arc<dyn Extractor>,
}

impl ProfileScraper {
    pub fn new(source: Arc<dyn DocumentSource>, extractor: Arc<dyn Extractor>) -> Self {
        Self { source, extractor }
    }

    pub async fn scrape(&self, url: &str) -> Result<ProfileSignals, ScrapeFailure> {
        let html = match self.source.document(url).await {
            Ok(html) => html,
            Err(failure) => {
                outreach_warn!("Scrape of {} failed: {}", url, failure);
                return Err(failure);
            }
        };
        let signals = self.extractor.extract(&html);
        outreach_info!(
            "Scraped {} name_found={} hiring={}",
            url,
            !signals.name().is_empty(),
            signals.is_hiring()
        );
        Ok(signals)
    }
}
