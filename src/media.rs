//! Uploaded and generated images.
//!
//! Images travel as base64 the whole way through: uploads are kept encoded
//! until they are forwarded to Gemini, and results stay encoded until they
//! are saved or returned to the caller.
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AppError, AppResult};

pub const THUMBNAIL_DOWNLOAD_NAME: &str = "youtube-thumbnail.png";
pub const SOCIAL_POST_DOWNLOAD_NAME: &str = "social-post-image.png";
pub const BACKGROUND_REMOVED_DOWNLOAD_NAME: &str = "background-removed.png";

const READ_FAILED: &str = "Failed to read image file.";

/// An image supplied by the user as a reference or as the subject to edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseImage {
    pub file_name: String,
    pub base64: String,
    pub mime_type: String,
}

impl BaseImage {
    pub fn from_bytes(file_name: impl Into<String>, bytes: &[u8], mime_type: Option<&str>) -> AppResult<Self> {
        if bytes.is_empty() {
            return Err(AppError::validation(READ_FAILED));
        }
        let file_name = file_name.into();
        let mime_type = resolve_mime(mime_type, bytes, &file_name)?;
        Ok(BaseImage {
            file_name,
            base64: STANDARD.encode(bytes),
            mime_type,
        })
    }

    pub async fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            tracing::warn!("failed to read {}: {}", path.display(), e);
            AppError::validation(READ_FAILED)
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Self::from_bytes(file_name, &bytes, None)
    }

    /// Accepts either bare base64 or a `data:<mime>;base64,<payload>` URL.
    pub fn from_encoded(file_name: impl Into<String>, data: &str, mime_type: Option<&str>) -> AppResult<Self> {
        let (url_mime, payload) = match split_data_url(data) {
            Some((mime, payload)) => (Some(mime), payload),
            None => (None, data.trim()),
        };
        let bytes = STANDARD
            .decode(payload)
            .map_err(|_| AppError::validation(READ_FAILED))?;
        Self::from_bytes(file_name, &bytes, mime_type.or(url_mime))
    }

    /// Data URL used wherever the original file would be previewed.
    pub fn preview(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

/// Wire shape of an uploaded image in request bodies.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageUpload {
    pub data: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

impl TryFrom<ImageUpload> for BaseImage {
    type Error = AppError;

    fn try_from(upload: ImageUpload) -> AppResult<Self> {
        let name = upload.file_name.unwrap_or_else(|| "upload".to_string());
        BaseImage::from_encoded(name, &upload.data, upload.mime_type.as_deref())
    }
}

/// An image returned by the generative API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub base64: String,
    pub mime_type: String,
}

impl GeneratedImage {
    pub fn new(base64: impl Into<String>, mime_type: Option<&str>) -> Self {
        GeneratedImage {
            base64: base64.into(),
            mime_type: mime_type.unwrap_or("image/png").to_string(),
        }
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }

    pub fn bytes(&self) -> AppResult<Vec<u8>> {
        STANDARD
            .decode(&self.base64)
            .map_err(|e| AppError::Decode(e.to_string()))
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> AppResult<usize> {
        let path = path.as_ref();
        let bytes = self.bytes()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, &bytes).await?;
        Ok(bytes.len())
    }

    pub fn into_payload(self, download_name: &str) -> ImagePayload {
        ImagePayload {
            data_url: self.data_url(),
            mime_type: self.mime_type,
            data: self.base64,
            download_name: download_name.to_string(),
        }
    }
}

/// Wire shape of a generated image in response bodies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
    pub data_url: String,
    pub download_name: String,
}

fn split_data_url(data: &str) -> Option<(&str, &str)> {
    let rest = data.trim().strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    Some((mime, payload))
}

fn resolve_mime(explicit: Option<&str>, bytes: &[u8], file_name: &str) -> AppResult<String> {
    let mime = explicit
        .map(|m| m.trim().to_ascii_lowercase())
        .filter(|m| !m.is_empty())
        .or_else(|| sniff_mime(bytes).map(String::from))
        .or_else(|| mime_from_extension(file_name).map(String::from))
        .ok_or_else(|| AppError::validation(READ_FAILED))?;
    if !mime.starts_with("image/") {
        return Err(AppError::validation(READ_FAILED));
    }
    Ok(mime)
}

fn sniff_mime(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("image/png");
    }
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    None
}

fn mime_from_extension(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}
