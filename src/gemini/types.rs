//! Request/response bodies for Gemini's `generateContent` endpoint.
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<RequestPart>,
}

/// Text or inline image data.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RequestPart {
    Text { text: String },
    #[serde(rename_all = "camelCase")]
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

impl GenerateContentRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        GenerateContentRequest {
            contents: vec![Content { parts: vec![RequestPart::Text { text: prompt.into() }] }],
            generation_config: None,
        }
    }

    /// Text prompt whose answer must be JSON matching `schema`.
    pub fn json(prompt: impl Into<String>, schema: Value) -> Self {
        GenerateContentRequest {
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema),
                ..Default::default()
            }),
            ..Self::text(prompt)
        }
    }

    /// Image output, optionally conditioned on an input image placed before the prompt.
    pub fn image(prompt: impl Into<String>, input: Option<InlineData>) -> Self {
        let mut parts = Vec::new();
        if let Some(inline_data) = input {
            parts.push(RequestPart::InlineData { inline_data });
        }
        parts.push(RequestPart::Text { text: prompt.into() });
        GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["IMAGE".to_string(), "TEXT".to_string()]),
                ..Default::default()
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
    #[serde(default)]
    pub block_reason_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub inline_data: Option<InlineData>,
}

/// Finish reasons that mean the output was withheld by safety filters.
pub const BLOCKING_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "IMAGE_SAFETY",
    "IMAGE_PROHIBITED_CONTENT",
    "IMAGE_RECITATION",
    "RECITATION",
    "PROHIBITED_CONTENT",
    "BLOCKLIST",
    "SPII",
];
