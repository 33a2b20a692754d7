//! Recording stand-in for the generative service.
use async_trait::async_trait;
use std::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::gemini::{GenerativeService, SocialPost};
use crate::media::GeneratedImage;
use crate::options::{PostType, SocialPlatform};
use crate::workflow::thumbnail::ThumbnailOptions;

pub const PNG: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

/// Base64 returned for every generated image.
pub const IMAGE_B64: &str = "iVBORw0KGgo=";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    EnhancePrompt { title: String, has_base_image: bool },
    GenerateImage(String),
    EditImage { prompt: String, base64: String, mime_type: String },
    RemoveBackground { base64: String, mime_type: String },
    GenerateSocialPost { platform: SocialPlatform, post_type: PostType, idea: String },
    GenerateImageForPost(String),
}

#[derive(Default)]
pub struct RecordingService {
    pub calls: Mutex<Vec<Call>>,
    pub empty_enhancement: bool,
    pub fail_images: bool,
    /// `imagePrompt` returned with every social post.
    pub post_image_prompt: Option<String>,
}

impl RecordingService {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn image(&self) -> AppResult<GeneratedImage> {
        if self.fail_images {
            return Err(AppError::Gemini { status: 500, message: "backend down".into() });
        }
        Ok(GeneratedImage::new(IMAGE_B64, None))
    }
}

#[async_trait]
impl GenerativeService for RecordingService {
    async fn enhance_prompt(&self, title: &str, _options: &ThumbnailOptions, has_base_image: bool) -> AppResult<String> {
        self.record(Call::EnhancePrompt { title: title.to_string(), has_base_image });
        if self.empty_enhancement {
            return Ok(String::new());
        }
        Ok(format!("enhanced: {}", title))
    }

    async fn generate_image(&self, prompt: &str) -> AppResult<GeneratedImage> {
        self.record(Call::GenerateImage(prompt.to_string()));
        self.image()
    }

    async fn edit_image(&self, prompt: &str, base_image_base64: &str, mime_type: &str) -> AppResult<GeneratedImage> {
        self.record(Call::EditImage {
            prompt: prompt.to_string(),
            base64: base_image_base64.to_string(),
            mime_type: mime_type.to_string(),
        });
        self.image()
    }

    async fn remove_background(&self, image_base64: &str, mime_type: &str) -> AppResult<GeneratedImage> {
        self.record(Call::RemoveBackground {
            base64: image_base64.to_string(),
            mime_type: mime_type.to_string(),
        });
        self.image()
    }

    async fn generate_social_post(&self, platform: SocialPlatform, post_type: PostType, idea: &str) -> AppResult<SocialPost> {
        self.record(Call::GenerateSocialPost { platform, post_type, idea: idea.to_string() });
        Ok(SocialPost {
            post_text: format!("{} post about {}", platform, idea),
            image_prompt: self.post_image_prompt.clone(),
        })
    }

    async fn generate_image_for_post(&self, image_prompt: &str) -> AppResult<GeneratedImage> {
        self.record(Call::GenerateImageForPost(image_prompt.to_string()));
        self.image()
    }
}
