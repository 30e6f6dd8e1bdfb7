//! Voice assistant request and response envelopes.
//!
//! These mirror the JSON documents the voice platform exchanges with a skill
//! backend. Only the parts the skill reads or writes are modelled; unknown
//! fields are ignored on input.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Status code reported when a spoken value matched a known entity.
pub const ER_SUCCESS_MATCH: &str = "ER_SUCCESS_MATCH";

/// Protocol version written on every response.
pub const RESPONSE_VERSION: &str = "1.0";

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// An incoming skill request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRequest {
    #[serde(default)]
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,

    pub request: Request,
}

/// Session information attached to a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// The request body, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// The user opened the skill without asking anything.
    LaunchRequest,

    /// The user asked for something.
    IntentRequest { intent: Intent },

    /// The session was closed.
    SessionEndedRequest {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },

    /// Any request type the skill does not handle.
    #[serde(other)]
    Unknown,
}

impl Request {
    /// Returns the request type name, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LaunchRequest => "LaunchRequest",
            Self::IntentRequest { .. } => "IntentRequest",
            Self::SessionEndedRequest { .. } => "SessionEndedRequest",
            Self::Unknown => "Unknown",
        }
    }
}

/// A recognised intent and its slot values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,

    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

impl Intent {
    /// Creates an intent without slots.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: HashMap::new(),
        }
    }

    /// Builder method to add a slot, keyed by its name.
    pub fn with_slot(mut self, slot: Slot) -> Self {
        self.slots.insert(slot.name.clone(), slot);
        self
    }

    /// Returns the slot called `name`.
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }
}

/// A single slot value as heard, plus entity resolution results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolutions: Option<Resolutions>,
}

impl Slot {
    /// Creates a slot with a raw spoken value.
    pub fn new(name: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            name: name.into(),
            value: value.map(str::to_string),
            resolutions: None,
        }
    }

    /// Builder method to attach one resolution authority.
    pub fn with_resolution(mut self, authority: ResolutionAuthority) -> Self {
        self.resolutions
            .get_or_insert_with(Resolutions::default)
            .resolutions_per_authority
            .push(authority);
        self
    }
}

/// Entity resolution results for a slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolutions {
    #[serde(default)]
    pub resolutions_per_authority: Vec<ResolutionAuthority>,
}

/// The results from one resolution authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionAuthority {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,

    pub status: ResolutionStatus,

    #[serde(default)]
    pub values: Vec<ResolutionValueWrapper>,
}

impl ResolutionAuthority {
    /// Creates an authority result with the given status code and values.
    pub fn new(code: impl Into<String>, names: &[&str]) -> Self {
        Self {
            authority: None,
            status: ResolutionStatus { code: code.into() },
            values: names
                .iter()
                .map(|name| ResolutionValueWrapper {
                    value: ResolutionValue {
                        name: name.to_string(),
                        id: None,
                    },
                })
                .collect(),
        }
    }
}

/// Resolution status, e.g. `ER_SUCCESS_MATCH` or `ER_SUCCESS_NO_MATCH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionStatus {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionValueWrapper {
    pub value: ResolutionValue,
}

/// A canonical entity value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionValue {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// An outgoing skill response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillResponse {
    pub version: String,
    pub response: ResponseBody,
}

/// What the device should say and whether the session stays open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

/// Speech output, either plain text or SSML markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    #[serde(rename = "PlainText")]
    PlainText { text: String },

    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

impl OutputSpeech {
    /// Returns the text or markup to be spoken.
    pub fn content(&self) -> &str {
        match self {
            Self::PlainText { text } => text,
            Self::Ssml { ssml } => ssml,
        }
    }
}

impl SkillResponse {
    /// Says `speech` and ends the session.
    pub fn tell(speech: OutputSpeech) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            response: ResponseBody {
                output_speech: Some(speech),
                should_end_session: Some(true),
            },
        }
    }

    /// Says plain `text` and ends the session.
    pub fn tell_text(text: impl Into<String>) -> Self {
        Self::tell(OutputSpeech::PlainText { text: text.into() })
    }

    /// Says `ssml` markup and ends the session.
    pub fn tell_ssml(ssml: impl Into<String>) -> Self {
        Self::tell(OutputSpeech::Ssml { ssml: ssml.into() })
    }

    /// Builder method to keep the session open or close it.
    pub fn with_end_session(mut self, end: bool) -> Self {
        self.response.should_end_session = Some(end);
        self
    }

    /// Returns the spoken content, if any.
    pub fn speech(&self) -> Option<&str> {
        self.response.output_speech.as_ref().map(OutputSpeech::content)
    }

    /// Returns whether the session ends after this response.
    pub fn ends_session(&self) -> bool {
        self.response.should_end_session.unwrap_or(true)
    }
}
