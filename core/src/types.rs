use serde::{Deserialize, Serialize};

/// Request to Gemini API to generate content
#[derive(Serialize, Debug)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Builds the single-turn request shape the API expects:
    /// `{ "contents": [ { "parts": [ { "text": ... } ] } ] }`
    pub fn from_text(text: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part::text(text)],
            }],
        }
    }
}

/// Content structure for requests
#[derive(Serialize, Clone, Debug)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// Part structure for a piece of content
#[derive(Serialize, Clone, Debug)]
pub struct Part {
    pub text: String,
}

impl Part {
    pub fn text(text: String) -> Self {
        Self { text }
    }
}

/// Response from Gemini API. Every field is defaulted: a well-formed JSON
/// body that lacks the expected nesting deserializes to an empty response
/// instead of failing.
#[derive(Deserialize, Debug, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Candidate in the response
#[derive(Deserialize, Debug, Default)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

/// Content part in the response
#[derive(Deserialize, Debug, Default)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<PartResponse>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Part response from the API
#[derive(Deserialize, Debug, Default)]
pub struct PartResponse {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate's first part, if present.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}
