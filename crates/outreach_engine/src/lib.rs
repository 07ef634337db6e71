//! Outreach engine: page analysis and the IO behind panel effects.
mod classify;
mod compose;
mod decode;
mod engine;
mod extract;
mod scrape;
mod selectors;
mod source;
mod types;

pub use classify::{
    HiringClassifier, HiringSignals, HEADER_SELECTORS, HIRING_BADGE_SELECTORS,
    HIRING_KEYWORDS, HIRING_SECTION_SELECTORS, OPEN_TO_WORK_SELECTORS, RECRUITER_ROLE_MARKERS,
};
pub use compose::{
    build_prompt, check_api_key, map_provider_error, resume_excerpt, ChatCompletionsRequester,
    GenerationSettings, MessageRequester, API_KEY_PREFIX, DEFAULT_ENDPOINT, DEFAULT_MODEL,
    MAX_RESUME_CHARS, MIN_API_KEY_LEN, TRUNCATION_MARKER,
};
pub use decode::{decode_document, DecodedDocument};
pub use engine::EngineHandle;
pub use extract::{Extractor, LinkedInExtractor, ProfileReport, NAME_SELECTORS, POSITION_SELECTORS};
pub use scrape::ProfileScraper;
pub use selectors::{element_text, SelectorChain};
pub use source::{DocumentSource, FetchSettings, HttpDocumentSource, SnapshotDocumentSource};
pub use types::{
    CheckToken, EngineEvent, MessageKind, ProfileSignals, RequestError, RequestId, ScrapeFailure,
};
