//! Background removal workflow.
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::gemini::GenerativeService;
use crate::media::{BaseImage, GeneratedImage};

pub const MISSING_IMAGE: &str = "Please upload an image first.";

#[derive(Clone)]
pub struct BackgroundRemovalWorkflow {
    service: Arc<dyn GenerativeService>,
}

impl BackgroundRemovalWorkflow {
    pub fn new(service: Arc<dyn GenerativeService>) -> Self {
        BackgroundRemovalWorkflow { service }
    }

    pub async fn run(&self, image: Option<&BaseImage>) -> AppResult<GeneratedImage> {
        let image = image.ok_or_else(|| AppError::validation(MISSING_IMAGE))?;
        tracing::info!(file = %image.file_name, mime = %image.mime_type, "removing background");
        self.service.remove_background(&image.base64, &image.mime_type).await
    }
}
