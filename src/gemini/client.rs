//! Thin HTTP client for Gemini's `generateContent` endpoint.
//!
//! - `generate_text` returns the concatenated text parts of the first candidate.
//! - `generate_json` does the same with JSON mode and a response schema.
//! - `generate_image` returns the first inline image of the first candidate.
use reqwest::Client;
use std::time::Duration;

use crate::config::Config;
use crate::error::{truncate_message, AppError, AppResult};
use crate::gemini::types::{
    GenerateContentRequest, GenerateContentResponse, InlineData, ResponsePart, BLOCKING_FINISH_REASONS,
};
use crate::media::GeneratedImage;

const MAX_ERROR_CHARS: usize = 300;

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    pub fn new(
        base_url: String,
        api_key: String,
        text_model: String,
        image_model: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base = base_url.trim_end_matches('/').to_string();
        Ok(GeminiClient { client, base_url: base, api_key, text_model, image_model })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.gemini_base_url.clone(),
            config.api_key.clone(),
            config.text_model.clone(),
            config.image_model.clone(),
            config.request_timeout,
        )
    }

    pub fn text_model(&self) -> &str {
        &self.text_model
    }

    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    async fn generate_content(&self, model: &str, body: &GenerateContentRequest) -> AppResult<GenerateContentResponse> {
        let url = self.endpoint(model);
        tracing::debug!(model, "sending generateContent request");

        let response = self.client.post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        let status = response.status();
        if status.is_success() {
            let parsed: GenerateContentResponse = response.json().await.map_err(AppError::HttpClient)?;
            check_feedback(&parsed)?;
            Ok(parsed)
        } else {
            let error_body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            let message = extract_error_message(&error_body);
            tracing::error!(model, status = status.as_u16(), "Gemini request failed: {}", message);
            Err(AppError::Gemini { status: status.as_u16(), message })
        }
    }

    /// Free-form text from the text model.
    pub async fn generate_text(&self, prompt: &str) -> AppResult<String> {
        let body = GenerateContentRequest::text(prompt);
        let response = self.generate_content(&self.text_model, &body).await?;
        let text = collect_text(first_parts(response)?);
        if text.trim().is_empty() {
            return Err(AppError::UnexpectedResponse("No text in Gemini response".to_string()));
        }
        tracing::info!(model = %self.text_model, chars = text.len(), "text generated");
        Ok(text)
    }

    /// Structured output from the text model, parsed into `T`.
    pub async fn generate_json<T: serde::de::DeserializeOwned>(
        &self,
        prompt: &str,
        schema: serde_json::Value,
    ) -> AppResult<T> {
        let body = GenerateContentRequest::json(prompt, schema);
        let response = self.generate_content(&self.text_model, &body).await?;
        let text = collect_text(first_parts(response)?);
        serde_json::from_str(strip_code_fence(&text)).map_err(|e| {
            tracing::error!("unparseable JSON from Gemini: {}", truncate_message(&text, MAX_ERROR_CHARS));
            AppError::UnexpectedResponse(format!("Gemini returned invalid JSON: {}", e))
        })
    }

    /// An image from the image model, optionally editing `input`.
    pub async fn generate_image(&self, prompt: &str, input: Option<InlineData>) -> AppResult<GeneratedImage> {
        let input_bytes = input.as_ref().map(|i| i.data.len()).unwrap_or(0);
        let body = GenerateContentRequest::image(prompt, input);
        let response = self.generate_content(&self.image_model, &body).await?;
        let parts = first_parts(response)?;

        let mut commentary = String::new();
        for part in parts {
            if let Some(inline) = part.inline_data {
                tracing::info!(
                    model = %self.image_model,
                    input_bytes,
                    output_bytes = inline.data.len(),
                    "image generated"
                );
                return Ok(GeneratedImage::new(inline.data, Some(&inline.mime_type)));
            }
            if let Some(text) = part.text {
                commentary.push_str(&text);
            }
        }

        let detail = if commentary.trim().is_empty() {
            "No image data in Gemini response".to_string()
        } else {
            format!("No image data in Gemini response: {}", truncate_message(&commentary, MAX_ERROR_CHARS))
        };
        Err(AppError::UnexpectedResponse(detail))
    }
}

fn check_feedback(response: &GenerateContentResponse) -> AppResult<()> {
    if let Some(ref feedback) = response.prompt_feedback {
        if let Some(ref reason) = feedback.block_reason {
            let msg = feedback
                .block_reason_message
                .clone()
                .unwrap_or_else(|| format!("Prompt blocked: {}", reason));
            return Err(AppError::ContentBlocked(msg));
        }
    }
    Ok(())
}

fn first_parts(response: GenerateContentResponse) -> AppResult<Vec<ResponsePart>> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AppError::UnexpectedResponse("No candidates in Gemini response".to_string()))?;

    if let Some(ref reason) = candidate.finish_reason {
        if BLOCKING_FINISH_REASONS.contains(&reason.as_str()) {
            return Err(AppError::ContentBlocked(format!(
                "Content blocked by Gemini safety filter: {}",
                reason
            )));
        }
    }

    candidate
        .content
        .map(|c| c.parts)
        .ok_or_else(|| AppError::UnexpectedResponse("No content in Gemini candidate".to_string()))
}

fn collect_text(parts: Vec<ResponsePart>) -> String {
    parts.into_iter().filter_map(|p| p.text).collect::<Vec<_>>().join("")
}

/// Models occasionally wrap JSON in a markdown fence even in JSON mode.
fn strip_code_fence(text: &str) -> &str {
    let t = text.trim();
    let Some(inner) = t.strip_prefix("```") else { return t };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Pulls `error.message` out of Google's error envelope, else the raw body.
fn extract_error_message(body: &str) -> String {
    let from_envelope = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message").and_then(|m| m.as_str()).map(String::from));
    truncate_message(&from_envelope.unwrap_or_else(|| body.to_string()), MAX_ERROR_CHARS)
}
