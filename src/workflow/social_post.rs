//! Social post workflow: post text first, then the suggested image if any.
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::gemini::GenerativeService;
use crate::media::GeneratedImage;
use crate::options::{PostType, SocialPlatform};

pub const MISSING_IDEA: &str = "Please provide the main idea for your post.";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocialPostRequest {
    #[serde(default)]
    pub platform: SocialPlatform,
    #[serde(default)]
    pub post_type: PostType,
    #[serde(default)]
    pub idea: String,
}

#[derive(Debug, Clone)]
pub struct SocialPostOutcome {
    pub post_text: String,
    pub image_prompt: Option<String>,
    /// `None` when the model suggested no image.
    pub image: Option<GeneratedImage>,
}

#[derive(Clone)]
pub struct SocialPostWorkflow {
    service: Arc<dyn GenerativeService>,
}

impl SocialPostWorkflow {
    pub fn new(service: Arc<dyn GenerativeService>) -> Self {
        SocialPostWorkflow { service }
    }

    pub async fn run(&self, request: &SocialPostRequest) -> AppResult<SocialPostOutcome> {
        if request.idea.is_empty() {
            return Err(AppError::validation(MISSING_IDEA));
        }

        let post = self
            .service
            .generate_social_post(request.platform, request.post_type, &request.idea)
            .await?;

        let image_prompt = post.image_prompt.filter(|p| !p.trim().is_empty());
        let image = match &image_prompt {
            Some(p) => Some(self.service.generate_image_for_post(p).await?),
            None => {
                tracing::debug!("no image suggested for post");
                None
            }
        };

        Ok(SocialPostOutcome { post_text: post.post_text, image_prompt, image })
    }
}
