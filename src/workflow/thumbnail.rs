//! YouTube thumbnail workflow.
//!
//! Title and options are expanded into a detailed prompt by the text model,
//! then rendered by the image model. With an uploaded base image the image
//! is edited instead of generated from scratch. A caller-supplied prompt
//! skips the enhancement step, which is how retries and edited prompts run.
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::gemini::GenerativeService;
use crate::media::{BaseImage, GeneratedImage};
use crate::options::{
    ArtStyle, AspectRatio, FontStyle, Framing, ImageEffect, LightingStyle, TextPlacement, ThumbnailTheme,
};

pub const MISSING_TITLE: &str = "Please provide a title for the thumbnail.";
pub const EMPTY_PROMPT: &str = "Prompt could not be generated.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailOptions {
    pub theme: ThumbnailTheme,
    pub aspect_ratio: AspectRatio,
    pub text_placement: TextPlacement,
    pub font_style: FontStyle,
    pub text_color_style: String,
    pub art_style: ArtStyle,
    pub lighting_style: LightingStyle,
    pub framing: Framing,
    pub color_palette: String,
    pub negative_prompt: String,
    pub image_effect: ImageEffect,
}

#[derive(Debug, Clone, Default)]
pub struct ThumbnailRequest {
    pub title: String,
    pub options: ThumbnailOptions,
    pub base_image: Option<BaseImage>,
    /// Use this prompt verbatim instead of asking for an enhanced one.
    pub prompt: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ThumbnailOutcome {
    /// The prompt the image was rendered from; feed it back to retry or edit.
    pub prompt: String,
    pub image: GeneratedImage,
}

#[derive(Clone)]
pub struct ThumbnailWorkflow {
    service: Arc<dyn GenerativeService>,
}

impl ThumbnailWorkflow {
    pub fn new(service: Arc<dyn GenerativeService>) -> Self {
        ThumbnailWorkflow { service }
    }

    /// Only the enhancement step, for reviewing or editing before rendering.
    pub async fn enhance(&self, request: &ThumbnailRequest) -> AppResult<String> {
        if request.title.is_empty() {
            return Err(AppError::validation(MISSING_TITLE));
        }
        let prompt = self
            .service
            .enhance_prompt(&request.title, &request.options, request.base_image.is_some())
            .await?;
        if prompt.trim().is_empty() {
            return Err(AppError::Generation(EMPTY_PROMPT.to_string()));
        }
        Ok(prompt)
    }

    pub async fn run(&self, request: &ThumbnailRequest) -> AppResult<ThumbnailOutcome> {
        let override_prompt = request.prompt.as_deref().filter(|p| !p.trim().is_empty());
        if request.title.is_empty() && override_prompt.is_none() {
            return Err(AppError::validation(MISSING_TITLE));
        }

        let prompt = match override_prompt {
            Some(p) => {
                tracing::debug!("using caller-supplied thumbnail prompt");
                p.to_string()
            }
            None => self.enhance(request).await?,
        };

        let image = match &request.base_image {
            Some(base) => {
                tracing::info!(file = %base.file_name, "editing uploaded image into thumbnail");
                self.service.edit_image(&prompt, &base.base64, &base.mime_type).await?
            }
            None => self.service.generate_image(&prompt).await?,
        };

        Ok(ThumbnailOutcome { prompt, image })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ArtStyle;
    use crate::workflow::testing::{Call, RecordingService};

    fn workflow(service: &Arc<RecordingService>) -> ThumbnailWorkflow {
        ThumbnailWorkflow::new(service.clone())
    }

    fn upload() -> BaseImage {
        BaseImage::from_bytes("me.png", &crate::workflow::testing::PNG, None).unwrap()
    }

    #[tokio::test]
    async fn without_upload_generates_from_enhanced_prompt() {
        let service = Arc::new(RecordingService::default());
        let request = ThumbnailRequest { title: "My Setup".into(), ..Default::default() };

        let outcome = workflow(&service).run(&request).await.unwrap();

        assert_eq!(outcome.prompt, "enhanced: My Setup");
        assert_eq!(
            service.calls(),
            vec![
                Call::EnhancePrompt { title: "My Setup".into(), has_base_image: false },
                Call::GenerateImage("enhanced: My Setup".into()),
            ]
        );
    }

    #[tokio::test]
    async fn with_upload_edits_instead_of_generating() {
        let service = Arc::new(RecordingService::default());
        let base = upload();
        let request = ThumbnailRequest {
            title: "My Setup".into(),
            base_image: Some(base.clone()),
            ..Default::default()
        };

        workflow(&service).run(&request).await.unwrap();

        let calls = service.calls();
        assert_eq!(calls[0], Call::EnhancePrompt { title: "My Setup".into(), has_base_image: true });
        assert_eq!(
            calls[1],
            Call::EditImage {
                prompt: "enhanced: My Setup".into(),
                base64: base.base64,
                mime_type: "image/png".into(),
            }
        );
        assert!(!calls.iter().any(|c| matches!(c, Call::GenerateImage(_))));
    }

    #[tokio::test]
    async fn prompt_override_skips_enhancement() {
        let service = Arc::new(RecordingService::default());
        let request = ThumbnailRequest {
            title: String::new(),
            prompt: Some("hand edited prompt".into()),
            ..Default::default()
        };

        let outcome = workflow(&service).run(&request).await.unwrap();

        assert_eq!(outcome.prompt, "hand edited prompt");
        assert_eq!(service.calls(), vec![Call::GenerateImage("hand edited prompt".into())]);
    }

    #[tokio::test]
    async fn missing_title_makes_no_calls() {
        let service = Arc::new(RecordingService::default());
        let request = ThumbnailRequest { prompt: Some("   ".into()), ..Default::default() };

        let err = workflow(&service).run(&request).await.unwrap_err();

        assert_eq!(err.user_message(), MISSING_TITLE);
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_enhancement_is_an_error() {
        let service = Arc::new(RecordingService { empty_enhancement: true, ..Default::default() });
        let request = ThumbnailRequest { title: "t".into(), ..Default::default() };

        let err = workflow(&service).run(&request).await.unwrap_err();

        assert_eq!(err.user_message(), "An error occurred: Prompt could not be generated.");
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_GATEWAY);
        assert_eq!(service.calls().len(), 1);
    }

    #[tokio::test]
    async fn service_failure_surfaces_as_message() {
        let service = Arc::new(RecordingService { fail_images: true, ..Default::default() });
        let request = ThumbnailRequest { title: "t".into(), ..Default::default() };

        let err = workflow(&service).run(&request).await.unwrap_err();

        assert!(err.user_message().starts_with("An error occurred: "));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: ThumbnailOptions =
            serde_json::from_str(r#"{"art_style": "Watercolor", "color_palette": "teal"}"#).unwrap();
        assert_eq!(options.art_style, ArtStyle::Watercolor);
        assert_eq!(options.color_palette, "teal");
        assert_eq!(options.aspect_ratio, AspectRatio::Landscape);
        assert!(serde_json::from_str::<ThumbnailOptions>(r#"{"framing": "Drone"}"#).is_err());
    }
}
