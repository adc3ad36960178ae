//! Chat completions wire types.
//!
//! Only the fields the council needs are modelled; everything else in the
//! response is ignored.

use council_application::CapabilityError;
use serde::{Deserialize, Serialize};

/// Chat completions request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// One message of the conversation
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> ChatMessage<'a> {
    pub fn system(content: &'a str) -> Self {
        Self {
            role: "system",
            content,
        }
    }

    pub fn user(content: &'a str) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

/// Chat completions response body
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Some providers report failures in a 200 body
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

/// Extract the assistant text from a raw response body.
///
/// An empty `content` string is returned as-is; callers decide whether an
/// empty reply is acceptable.
pub fn extract_content(body: &str) -> Result<String, CapabilityError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| CapabilityError::MalformedResponse(format!("invalid JSON: {e}")))?;

    if let Some(error) = response.error {
        let code = error.code.map(|c| format!(" ({c})")).unwrap_or_default();
        return Err(CapabilityError::RequestFailed(format!("{}{}", error.message, code)));
    }

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CapabilityError::MalformedResponse("no choices in response".to_string()))?;

    choice
        .message
        .and_then(|m| m.content)
        .ok_or_else(|| CapabilityError::MalformedResponse("choice has no message content".to_string()))
}
