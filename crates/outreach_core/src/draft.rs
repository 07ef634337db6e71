use crate::ProfileSignals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Ask a hiring contact for a referral.
    Referral,
    /// Ask for a short call.
    Meeting,
    /// Plain connection note.
    Connect,
}

impl MessageKind {
    pub const ALL: [MessageKind; 3] = [
        MessageKind::Referral,
        MessageKind::Meeting,
        MessageKind::Connect,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MessageKind::Referral => "referral",
            MessageKind::Meeting => "meeting",
            MessageKind::Connect => "connect",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label.trim()))
    }
}

/// Everything the requester needs to draft one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRequest {
    pub signals: ProfileSignals,
    pub resume: String,
    pub kind: MessageKind,
}

/// Why a draft could not be produced, as seen by the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftFailure {
    Configuration(String),
    QuotaExceeded,
    InvalidApiKey,
    Provider(String),
    MalformedResponse,
    Network(String),
}

impl DraftFailure {
    /// Text shown in place of the draft.
    pub fn user_text(&self) -> String {
        match self {
            DraftFailure::Configuration(reason) => {
                format!("Check your settings: {reason}. Use \"Start over\" to enter them again.")
            }
            DraftFailure::QuotaExceeded => {
                "Your API quota is exhausted. Check your plan and billing details.".to_string()
            }
            DraftFailure::InvalidApiKey => {
                "The API key was rejected. Use \"Start over\" to enter a valid key.".to_string()
            }
            DraftFailure::Provider(message) => format!("The provider returned an error: {message}"),
            DraftFailure::MalformedResponse => {
                "The provider sent a response that could not be read. Please try again.".to_string()
            }
            DraftFailure::Network(_) => {
                "Could not reach the provider. Check your connection and try again.".to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DraftState {
    #[default]
    Idle,
    Generating {
        kind: MessageKind,
    },
    Ready {
        kind: MessageKind,
        text: String,
    },
    Failed {
        kind: MessageKind,
        failure: DraftFailure,
    },
}

impl DraftState {
    pub fn kind(&self) -> Option<MessageKind> {
        match self {
            DraftState::Idle => None,
            DraftState::Generating { kind }
            | DraftState::Ready { kind, .. }
            | DraftState::Failed { kind, .. } => Some(*kind),
        }
    }
}
