//! Social Butler library
//!
//! Modules:
//! - `api`: Axum HTTP handlers and router setup used by the server binary.
//! - `gemini`: Client for Gemini's `generateContent` endpoint and the
//!   `GenerativeService` trait the workflows are written against.
//! - `workflow`: Thumbnail, social post and background removal workflows,
//!   plus the page router.
//! - `prompt`: Meta-prompt templates with `{{placeholder}}` replacement.
//! - `options`: The fixed option pickers.
//! - `media`: Uploaded and generated images.
//! - `utils`: `KEY=VALUE` override parsing for the CLI.
//! - `config`: Env-driven configuration loader.
//! - `error`: Common error type and alias.
//!
//! Re-exports are provided for common types: `Config`, `GeminiClient`,
//! `GenerativeService`, `PromptConstructor`, and the workflows.
pub mod api;
pub mod gemini;
pub mod workflow;
pub mod prompt;
pub mod options;
pub mod media;
pub mod utils;
pub mod config;
pub mod error;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use gemini::{GeminiClient, GenerativeService};
pub use prompt::constructor::PromptConstructor;
pub use workflow::{BackgroundRemovalWorkflow, Page, SocialPostWorkflow, ThumbnailWorkflow};
