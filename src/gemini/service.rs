//! The generative operations the workflows depend on.
//!
//! Workflows only see [`GenerativeService`]; [`GeminiClient`] is the real
//! implementation and tests substitute a recording fake.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::gemini::client::GeminiClient;
use crate::gemini::types::InlineData;
use crate::media::GeneratedImage;
use crate::options::{PostType, SocialPlatform};
use crate::prompt::{builder, templates};
use crate::workflow::thumbnail::ThumbnailOptions;

/// Text of a generated social post plus an optional image suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPost {
    pub post_text: String,
    #[serde(default)]
    pub image_prompt: Option<String>,
}

#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Expands the thumbnail form into a detailed image prompt.
    async fn enhance_prompt(&self, title: &str, options: &ThumbnailOptions, has_base_image: bool) -> AppResult<String>;

    async fn generate_image(&self, prompt: &str) -> AppResult<GeneratedImage>;

    async fn edit_image(&self, prompt: &str, base_image_base64: &str, mime_type: &str) -> AppResult<GeneratedImage>;

    async fn remove_background(&self, image_base64: &str, mime_type: &str) -> AppResult<GeneratedImage>;

    async fn generate_social_post(&self, platform: SocialPlatform, post_type: PostType, idea: &str) -> AppResult<SocialPost>;

    async fn generate_image_for_post(&self, image_prompt: &str) -> AppResult<GeneratedImage>;
}

#[async_trait]
impl GenerativeService for GeminiClient {
    async fn enhance_prompt(&self, title: &str, options: &ThumbnailOptions, has_base_image: bool) -> AppResult<String> {
        let meta_prompt = builder::thumbnail_enhancement_prompt(title, options, has_base_image)?;
        let enhanced = self.generate_text(&meta_prompt).await?;
        Ok(clean_prompt(&enhanced))
    }

    async fn generate_image(&self, prompt: &str) -> AppResult<GeneratedImage> {
        GeminiClient::generate_image(self, prompt, None).await
    }

    async fn edit_image(&self, prompt: &str, base_image_base64: &str, mime_type: &str) -> AppResult<GeneratedImage> {
        let input = InlineData {
            mime_type: mime_type.to_string(),
            data: base_image_base64.to_string(),
        };
        GeminiClient::generate_image(self, prompt, Some(input)).await
    }

    async fn remove_background(&self, image_base64: &str, mime_type: &str) -> AppResult<GeneratedImage> {
        self.edit_image(templates::BACKGROUND_REMOVAL, image_base64, mime_type).await
    }

    async fn generate_social_post(&self, platform: SocialPlatform, post_type: PostType, idea: &str) -> AppResult<SocialPost> {
        let prompt = builder::social_post_prompt(platform, post_type, idea)?;
        let mut post: SocialPost = self.generate_json(&prompt, builder::social_post_schema()).await?;
        if post.post_text.trim().is_empty() {
            return Err(AppError::UnexpectedResponse("Gemini returned an empty post".to_string()));
        }
        post.image_prompt = post
            .image_prompt
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        Ok(post)
    }

    async fn generate_image_for_post(&self, image_prompt: &str) -> AppResult<GeneratedImage> {
        GeminiClient::generate_image(self, image_prompt, None).await
    }
}

/// Strips the quoting and labels text models like to wrap prompts in.
fn clean_prompt(raw: &str) -> String {
    let mut s = raw.trim();
    for prefix in ["Prompt:", "prompt:", "**Prompt:**"] {
        if let Some(rest) = s.strip_prefix(prefix) {
            s = rest.trim_start();
        }
    }
    s.trim_matches('"').trim().to_string()
}
