use std::time::Duration;

use futures_util::StreamExt;
use outreach_logging::{outreach_debug, outreach_info, outreach_warn, redact};
use serde::{Deserialize, Serialize};

use crate::{MessageKind, ProfileSignals, RequestError};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const API_KEY_PREFIX: &str = "sk-";
pub const MIN_API_KEY_LEN: usize = 20;
/// Resume characters embedded in a prompt before truncation.
pub const MAX_RESUME_CHARS: usize = 3000;
pub const TRUNCATION_MARKER: &str = "...";

#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub request_timeout: Duration,
    /// Largest provider response body read before giving up.
    pub max_response_bytes: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: Some(400),
            request_timeout: Duration::from_secs(60),
            max_response_bytes: 1024 * 1024,
        }
    }
}

/// Drafts one outreach message per call. No retries.
#[async_trait::async_trait]
pub trait MessageRequester: Send + Sync {
    async fn request_message(
        &self,
        resume: &str,
        api_key: &str,
        signals: &ProfileSignals,
        kind: MessageKind,
    ) -> Result<String, RequestError>;
}

/// Cheap format check: known prefix and a plausible length.
///
/// Surrounding whitespace is ignored, matching how the key is sent.
pub fn check_api_key(api_key: &str) -> Result<(), RequestError> {
    let key = api_key.trim();
    if key.is_empty() {
        return Err(RequestError::Configuration("API key is missing".into()));
    }
    if !key.starts_with(API_KEY_PREFIX) || key.chars().count() < MIN_API_KEY_LEN {
        return Err(RequestError::Configuration(
            "API key does not look like a provider key".into(),
        ));
    }
    Ok(())
}

/// First [`MAX_RESUME_CHARS`] characters of the resume, marked when cut.
pub fn resume_excerpt(resume: &str) -> String {
    let resume = resume.trim();
    match resume.char_indices().nth(MAX_RESUME_CHARS) {
        Some((cut, _)) => format!("{}{}", &resume[..cut], TRUNCATION_MARKER),
        None => resume.to_string(),
    }
}

pub fn build_prompt(signals: &ProfileSignals, resume: &str, kind: MessageKind) -> String {
    let name = non_empty_or(signals.name(), "this person");
    let position = non_empty_or(signals.position(), "an unknown position");
    let hiring = if signals.is_hiring() {
        "They appear to be hiring."
    } else {
        "They do not appear to be hiring."
    };
    let task = match kind {
        MessageKind::Referral => {
            "Write a professional LinkedIn message asking them for a referral. \
             Highlight the most relevant experience from the resume."
        }
        MessageKind::Meeting => {
            "Write a professional LinkedIn message requesting a brief call to learn \
             about their experience and potential opportunities."
        }
        MessageKind::Connect => {
            "Write a short LinkedIn connection request note that gives one concrete \
             reason to connect, drawn from the resume."
        }
    };

    format!(
        "I am reaching out to {name}, who works as {position}. {hiring}\n\n\
         My resume:\n{resume}\n\n\
         {task} Keep it concise and friendly, under 150 words, and address them by name.",
        resume = resume_excerpt(resume),
    )
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value.trim()
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ProviderError,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    code: Option<serde_json::Value>,
    message: Option<String>,
}

/// OpenAI-compatible chat completions client.
#[derive(Debug, Clone)]
pub struct ChatCompletionsRequester {
    client: reqwest::Client,
    settings: GenerationSettings,
}

impl ChatCompletionsRequester {
    pub fn new(settings: GenerationSettings) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| RequestError::Network(err.to_string()))?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl MessageRequester for ChatCompletionsRequester {
    async fn request_message(
        &self,
        resume: &str,
        api_key: &str,
        signals: &ProfileSignals,
        kind: MessageKind,
    ) -> Result<String, RequestError> {
        if resume.trim().is_empty() {
            return Err(RequestError::Configuration("resume is missing".into()));
        }
        let api_key = api_key.trim();
        check_api_key(api_key)?;

        let prompt = build_prompt(signals, resume, kind);
        let body = ChatRequest {
            model: &self.settings.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        outreach_info!(
            "Requesting {} draft model={} key={} prompt_len={}",
            kind,
            self.settings.model,
            redact(api_key),
            prompt.len()
        );
        let response = self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| RequestError::Network(err.to_string()))?;

        let status = response.status();
        let text = read_capped(response, self.settings.max_response_bytes).await?;

        if !status.is_success() {
            let err = map_provider_error(status.as_u16(), &text);
            outreach_warn!("Provider answered {}: {}", status, err);
            return Err(err);
        }
        parse_completion(&text)
    }
}

/// Reads the body as text, refusing anything over `max_bytes`.
async fn read_capped(response: reqwest::Response, max_bytes: u64) -> Result<String, RequestError> {
    if let Some(content_len) = response.content_length() {
        if content_len > max_bytes {
            outreach_warn!("Provider response too large: {} > {}", content_len, max_bytes);
            return Err(RequestError::MalformedResponse);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|err| RequestError::Network(err.to_string()))?;
        let next_len = bytes.len() as u64 + chunk.len() as u64;
        if next_len > max_bytes {
            outreach_warn!("Provider response too large: over {} bytes", max_bytes);
            return Err(RequestError::MalformedResponse);
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Maps a failed response onto the error taxonomy.
///
/// Error codes in the body take precedence over the HTTP status.
pub fn map_provider_error(status: u16, body: &str) -> RequestError {
    let provider = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error);
    classify_error(status, provider)
}

fn classify_error(status: u16, provider: Option<ProviderError>) -> RequestError {
    let code = provider
        .as_ref()
        .and_then(|err| err.code.as_ref())
        .and_then(|code| code.as_str());

    match code {
        Some("insufficient_quota") => return RequestError::QuotaExceeded,
        Some("invalid_api_key") => return RequestError::InvalidApiKey,
        _ => {}
    }
    match status {
        429 => RequestError::QuotaExceeded,
        401 => RequestError::InvalidApiKey,
        _ => {
            let message = provider
                .and_then(|err| err.message)
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| format!("HTTP status {status}"));
            RequestError::Provider(message)
        }
    }
}

fn parse_completion(body: &str) -> Result<String, RequestError> {
    // Some gateways report failures with a 200 status.
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return Err(classify_error(200, Some(envelope.error)));
    }
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|_| RequestError::MalformedResponse)?;
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(RequestError::MalformedResponse)?;
    outreach_debug!("Draft received len={}", content.len());
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_truncates_on_char_boundary() {
        let long = "é".repeat(MAX_RESUME_CHARS + 10);
        let excerpt = resume_excerpt(&long);
        assert!(excerpt.ends_with(TRUNCATION_MARKER));
        assert_eq!(
            excerpt.chars().count(),
            MAX_RESUME_CHARS + TRUNCATION_MARKER.len()
        );
        assert_eq!(resume_excerpt("  short  "), "short");
    }

    #[test]
    fn key_format_check() {
        assert!(matches!(
            check_api_key("bad-key"),
            Err(RequestError::Configuration(_))
        ));
        assert!(matches!(check_api_key(""), Err(RequestError::Configuration(_))));
        assert!(check_api_key("sk-0123456789abcdefghij").is_ok());
        // Padding must not stretch a short key past the length check.
        assert!(matches!(
            check_api_key("sk-short            "),
            Err(RequestError::Configuration(_))
        ));
        assert!(check_api_key("  sk-0123456789abcdefghij\n").is_ok());
    }

    #[test]
    fn error_codes_beat_status() {
        let quota = r#"{"error":{"code":"insufficient_quota","message":"You exceeded your quota"}}"#;
        assert_eq!(map_provider_error(400, quota), RequestError::QuotaExceeded);
        let key = r#"{"error":{"code":"invalid_api_key","message":"Incorrect API key"}}"#;
        assert_eq!(map_provider_error(400, key), RequestError::InvalidApiKey);
        assert_eq!(map_provider_error(429, "busy"), RequestError::QuotaExceeded);
        assert_eq!(map_provider_error(401, ""), RequestError::InvalidApiKey);
        assert_eq!(
            map_provider_error(500, r#"{"error":{"code":null,"message":"overloaded"}}"#),
            RequestError::Provider("overloaded".into())
        );
        assert_eq!(
            map_provider_error(502, "<html>bad gateway</html>"),
            RequestError::Provider("HTTP status 502".into())
        );
    }

    #[test]
    fn completion_parsing() {
        let ok = r#"{"choices":[{"message":{"role":"assistant","content":"  Hi Jane!  "}}]}"#;
        assert_eq!(parse_completion(ok).as_deref(), Ok("Hi Jane!"));
        assert_eq!(
            parse_completion(r#"{"choices":[]}"#),
            Err(RequestError::MalformedResponse)
        );
        assert_eq!(parse_completion("not json"), Err(RequestError::MalformedResponse));
    }

    #[test]
    fn prompt_mentions_target_and_kind() {
        let signals = ProfileSignals::new("Jane Doe", "Talent Partner", true);
        let prompt = build_prompt(&signals, "Rust engineer", MessageKind::Referral);
        assert!(prompt.contains("Jane Doe"));
        assert!(prompt.contains("Talent Partner"));
        assert!(prompt.contains("appear to be hiring"));
        assert!(prompt.contains("referral"));
        assert!(prompt.contains("Rust engineer"));

        let anonymous = ProfileSignals::new("", "", false);
        let prompt = build_prompt(&anonymous, "cv", MessageKind::Connect);
        assert!(prompt.contains("this person"));
        assert!(prompt.contains("do not appear"));
    }
}
