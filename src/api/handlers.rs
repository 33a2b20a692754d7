//! Axum request handlers for the HTTP API.
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::routes::AppState;
use crate::error::{AppError, AppResult};
use crate::media::{self, BaseImage, ImagePayload, ImageUpload};
use crate::options;
use crate::workflow::social_post::SocialPostRequest;
use crate::workflow::thumbnail::{ThumbnailOptions, ThumbnailRequest};
use crate::workflow::{Page, PageDescriptor};

pub async fn root() -> &'static str {
    "Social Butler API"
}

pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

pub async fn list_pages() -> Json<Vec<PageDescriptor>> {
    Json(Page::ALL.iter().map(|p| p.descriptor()).collect())
}

pub async fn get_page(Path(slug): Path<String>) -> Json<PageDescriptor> {
    Json(Page::from_slug(&slug).descriptor())
}

// Options: picker names; plain lines by default, ?json=true for JSON
pub async fn options_pickers(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    if json_flag(&params) {
        Json(json!(options::PICKERS)).into_response()
    } else {
        lines(options::PICKERS.iter().copied()).into_response()
    }
}

// Options: values of one picker
pub async fn options_values(
    Path(name): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<axum::response::Response, AppError> {
    let values = options::values_for(&name)
        .ok_or_else(|| AppError::validation(format!("Unknown option list '{}'", name)))?;
    if json_flag(&params) {
        Ok(Json(json!(values)).into_response())
    } else {
        Ok(lines(values.into_iter()).into_response())
    }
}

#[derive(Debug, Deserialize)]
pub struct ThumbnailBody {
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub options: ThumbnailOptions,
    #[serde(default)]
    pub image: Option<ImageUpload>,
    #[serde(default)]
    pub prompt: Option<String>,
    /// Keys left over after the options took theirs.
    #[serde(flatten)]
    pub unknown: HashMap<String, Value>,
}

impl TryFrom<ThumbnailBody> for ThumbnailRequest {
    type Error = AppError;

    fn try_from(body: ThumbnailBody) -> AppResult<Self> {
        if let Some(key) = body.unknown.keys().min() {
            return Err(AppError::validation(format!("Unknown field '{}'", key)));
        }
        Ok(ThumbnailRequest {
            title: body.title,
            options: body.options,
            base_image: body.image.map(BaseImage::try_from).transpose()?,
            prompt: body.prompt,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub id: Uuid,
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct ThumbnailResponse {
    pub id: Uuid,
    pub prompt: String,
    pub image: ImagePayload,
}

#[derive(Debug, Serialize)]
pub struct SocialPostResponse {
    pub id: Uuid,
    pub post_text: String,
    pub image_prompt: Option<String>,
    pub image: Option<ImagePayload>,
}

#[derive(Debug, Deserialize)]
pub struct BackgroundRemovalBody {
    #[serde(default)]
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub id: Uuid,
    pub image: ImagePayload,
}

pub async fn thumbnail_prompt(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ThumbnailBody>, JsonRejection>,
) -> AppResult<Json<PromptResponse>> {
    let id = Uuid::new_v4();
    let request = ThumbnailRequest::try_from(body(payload)?)?;
    let prompt = state
        .thumbnail
        .enhance(&request)
        .instrument(tracing::info_span!("thumbnail_prompt", %id))
        .await?;
    Ok(Json(PromptResponse { id, prompt }))
}

pub async fn thumbnail(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ThumbnailBody>, JsonRejection>,
) -> AppResult<Json<ThumbnailResponse>> {
    let id = Uuid::new_v4();
    let request = ThumbnailRequest::try_from(body(payload)?)?;
    let outcome = state
        .thumbnail
        .run(&request)
        .instrument(tracing::info_span!("thumbnail", %id))
        .await?;
    Ok(Json(ThumbnailResponse {
        id,
        prompt: outcome.prompt,
        image: outcome.image.into_payload(media::THUMBNAIL_DOWNLOAD_NAME),
    }))
}

pub async fn social_post(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SocialPostRequest>, JsonRejection>,
) -> AppResult<Json<SocialPostResponse>> {
    let id = Uuid::new_v4();
    let request = body(payload)?;
    let outcome = state
        .social_post
        .run(&request)
        .instrument(tracing::info_span!("social_post", %id, platform = %request.platform))
        .await?;
    Ok(Json(SocialPostResponse {
        id,
        post_text: outcome.post_text,
        image_prompt: outcome.image_prompt,
        image: outcome.image.map(|i| i.into_payload(media::SOCIAL_POST_DOWNLOAD_NAME)),
    }))
}

pub async fn background_removal(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BackgroundRemovalBody>, JsonRejection>,
) -> AppResult<Json<ImageResponse>> {
    let id = Uuid::new_v4();
    let image = body(payload)?.image.map(BaseImage::try_from).transpose()?;
    let result = state
        .background
        .run(image.as_ref())
        .instrument(tracing::info_span!("background_removal", %id))
        .await?;
    Ok(Json(ImageResponse {
        id,
        image: result.into_payload(media::BACKGROUND_REMOVED_DOWNLOAD_NAME),
    }))
}

/// Malformed bodies and out-of-enumeration values become validation errors;
/// bodies over the upload limit keep their 413.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload.map(|Json(v)| v).map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::Validation(rejection.body_text())
        }
    })
}

fn json_flag(params: &HashMap<String, String>) -> bool {
    params.get("json").map(|v| v == "true" || v == "1").unwrap_or(false)
}

fn lines<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(item);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::router;
    use crate::workflow::testing::{Call, RecordingService, IMAGE_B64, PNG};
    use axum::http::Request;
    use base64::Engine;
    use hyper::Body;
    use tower::ServiceExt;

    fn app(service: Arc<RecordingService>) -> axum::Router {
        router(Arc::new(AppState::new(service)), 1024 * 1024)
    }

    async fn send(app: axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(v) => builder
                .header("content-type", "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        (status, bytes.to_vec())
    }

    fn as_json(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn thumbnail_with_upload_calls_edit_image() {
        let service = Arc::new(RecordingService::default());
        let upload = base64::engine::general_purpose::STANDARD.encode(PNG);
        let body = json!({
            "title": "Desk Tour",
            "art_style": "3D Render",
            "image": {"data": upload, "file_name": "desk.png"}
        });

        let (status, bytes) = send(app(service.clone()), "POST", "/thumbnail", Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        let v = as_json(&bytes);
        assert!(v["id"].as_str().unwrap().parse::<Uuid>().is_ok());
        assert_eq!(v["prompt"], "enhanced: Desk Tour");
        assert_eq!(v["image"]["data"], IMAGE_B64);
        assert_eq!(v["image"]["download_name"], "youtube-thumbnail.png");
        assert_eq!(v["image"]["data_url"], format!("data:image/png;base64,{}", IMAGE_B64));
        let calls = service.calls();
        assert!(matches!(calls[1], Call::EditImage { .. }));
        assert!(!calls.iter().any(|c| matches!(c, Call::GenerateImage(_))));
    }

    #[tokio::test]
    async fn thumbnail_prompt_only_enhances() {
        let service = Arc::new(RecordingService::default());
        let (status, bytes) =
            send(app(service.clone()), "POST", "/thumbnail/prompt", Some(json!({"title": "Hi"}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&bytes)["prompt"], "enhanced: Hi");
        assert_eq!(service.calls().len(), 1);
    }

    #[tokio::test]
    async fn missing_title_is_bad_request() {
        let service = Arc::new(RecordingService::default());
        let (status, bytes) = send(app(service), "POST", "/thumbnail", Some(json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(as_json(&bytes)["error"], "Please provide a title for the thumbnail.");
    }

    #[tokio::test]
    async fn unknown_option_is_bad_request() {
        let service = Arc::new(RecordingService::default());
        let body = json!({"title": "x", "theme": "Spooky"});
        let (status, bytes) = send(app(service.clone()), "POST", "/thumbnail", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let msg = as_json(&bytes)["error"].as_str().unwrap().to_string();
        assert!(msg.contains("Spooky"), "{}", msg);
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn misspelled_option_is_bad_request() {
        let service = Arc::new(RecordingService::default());
        let body = json!({"title": "x", "artstyle": "Pixel Art"});
        let (status, bytes) = send(app(service.clone()), "POST", "/thumbnail", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(as_json(&bytes)["error"], "Unknown field 'artstyle'");
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_enhancement_is_bad_gateway() {
        let service = Arc::new(RecordingService { empty_enhancement: true, ..Default::default() });
        let (status, bytes) = send(app(service), "POST", "/thumbnail", Some(json!({"title": "x"}))).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(as_json(&bytes)["error"], "An error occurred: Prompt could not be generated.");
    }

    #[tokio::test]
    async fn oversized_body_is_payload_too_large() {
        let service = Arc::new(RecordingService::default());
        let small = router(Arc::new(AppState::new(service.clone())), 64);
        let body = json!({"image": {"data": "A".repeat(256)}});

        let (status, bytes) = send(small, "POST", "/background_removal", Some(body)).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(as_json(&bytes)["error"].as_str().unwrap().contains("length limit exceeded"));
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn social_post_returns_text_and_image() {
        let service = Arc::new(RecordingService {
            post_image_prompt: Some("team photo".into()),
            ..Default::default()
        });
        let body = json!({"platform": "LinkedIn", "post_type": "Behind-the-Scenes", "idea": "our offsite"});

        let (status, bytes) = send(app(service), "POST", "/social_post", Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        let v = as_json(&bytes);
        assert_eq!(v["post_text"], "LinkedIn post about our offsite");
        assert_eq!(v["image_prompt"], "team photo");
        assert_eq!(v["image"]["download_name"], "social-post-image.png");
    }

    #[tokio::test]
    async fn background_removal_requires_image() {
        let service = Arc::new(RecordingService::default());
        let (status, bytes) = send(app(service), "POST", "/background_removal", Some(json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(as_json(&bytes)["error"], "Please upload an image first.");
    }

    #[tokio::test]
    async fn background_removal_rejects_non_images() {
        let service = Arc::new(RecordingService::default());
        let data = base64::engine::general_purpose::STANDARD.encode(b"plain text");
        let body = json!({"image": {"data": data, "file_name": "notes.txt"}});

        let (status, bytes) = send(app(service.clone()), "POST", "/background_removal", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(as_json(&bytes)["error"], "Failed to read image file.");
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_is_bad_gateway() {
        let service = Arc::new(RecordingService { fail_images: true, ..Default::default() });
        let data = base64::engine::general_purpose::STANDARD.encode(PNG);
        let body = json!({"image": {"data": data}});

        let (status, bytes) = send(app(service), "POST", "/background_removal", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let msg = as_json(&bytes)["error"].as_str().unwrap().to_string();
        assert!(msg.starts_with("An error occurred: "));
    }

    #[tokio::test]
    async fn options_as_lines_and_json() {
        let service = Arc::new(RecordingService::default());
        let (status, bytes) = send(app(service.clone()), "GET", "/options/aspect_ratio", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(String::from_utf8(bytes).unwrap(), "16:9\n1:1\n9:16\n");

        let (_, bytes) = send(app(service.clone()), "GET", "/options/platform?json=true", None).await;
        assert_eq!(as_json(&bytes), json!(["LinkedIn", "Instagram"]));

        let (status, _) = send(app(service), "GET", "/options/nope", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn pages_are_listed() {
        let service = Arc::new(RecordingService::default());
        let (_, bytes) = send(app(service.clone()), "GET", "/pages", None).await;
        let v = as_json(&bytes);
        assert_eq!(v.as_array().unwrap().len(), 3);
        assert_eq!(v[0]["slug"], "thumbnail");

        let (_, bytes) = send(app(service), "GET", "/pages/unknown", None).await;
        assert_eq!(as_json(&bytes)["page"], "Thumbnail");
    }
}
