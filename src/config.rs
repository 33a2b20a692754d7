//! Env-driven configuration for the service and the CLI.
//!
//! Values are read from the process environment; `dotenv` is loaded on demand
//! by the binaries. Everything except the API key has a development default.
use std::env;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub gemini_base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub request_timeout: Duration,
    pub api_host: String,
    pub api_port: String,
    pub output_dir: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    pub fn new() -> AppResult<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .map_err(|_| AppError::Config("GEMINI_API_KEY (or API_KEY) is not set".to_string()))?;
        Self::with_api_key(api_key)
    }

    /// Same as [`Config::new`] but with an explicit key, e.g. from a CLI flag.
    pub fn with_api_key(api_key: impl Into<String>) -> AppResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AppError::Config("API key is empty".to_string()));
        }
        Ok(Config {
            api_key,
            gemini_base_url: env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            text_model: env::var("GEMINI_TEXT_MODEL").unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string()),
            image_model: env::var("GEMINI_IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string()),
            request_timeout: Duration::from_secs(parse_or("GEMINI_TIMEOUT_SECS", 120)?),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            api_port: env::var("API_PORT").unwrap_or_else(|_| "8189".to_string()),
            output_dir: env::var("OUTPUT_DIR").unwrap_or_else(|_| "./static".to_string()),
            max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", 20 * 1024 * 1024)?,
        })
    }

    pub fn print_env_vars() {
        let masked = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .map(|k| mask_key(&k))
            .unwrap_or_else(|_| "<unset>".to_string());
        println!("GEMINI_API_KEY: {}", masked);
        for key in [
            "GEMINI_BASE_URL",
            "GEMINI_TEXT_MODEL",
            "GEMINI_IMAGE_MODEL",
            "GEMINI_TIMEOUT_SECS",
            "API_HOST",
            "API_PORT",
            "OUTPUT_DIR",
            "MAX_UPLOAD_BYTES",
        ] {
            println!("{}: {}", key, env::var(key).unwrap_or_else(|_| "<unset>".to_string()));
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> AppResult<T> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a number, got '{}'", key, raw))),
        Err(_) => Ok(default),
    }
}

fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    format!("{}****", visible)
}
