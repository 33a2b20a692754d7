pub mod client;
pub mod service;
pub mod types;

pub use client::GeminiClient;
pub use service::{GenerativeService, SocialPost};
