//! Runtime configuration loaded from the environment.

use crate::{Error, Result};

pub const DEFAULT_IMAGE_MODEL: &str = "gemini-3-pro-image-preview";

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub image_model: String,
}

impl Config {
    /// Reads configuration from the process environment (and `.env` if present).
    ///
    /// `GEMINI_API_KEY` is required; its absence is a hard failure before any
    /// network activity. `GEMINI_IMAGE_MODEL` optionally overrides the model.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").map_err(|_| {
                Error::Config("GEMINI_API_KEY environment variable not set".to_string())
            })?,
            image_model: std::env::var("GEMINI_IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string()),
        })
    }
}
