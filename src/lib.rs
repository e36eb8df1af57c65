//! CLI for generating images with Gemini's image models.
//!
//! Sends a text prompt to the streaming `generateContent` endpoint, prints any
//! text the model returns, and writes inline image payloads to disk using a
//! filename-or-prefix naming rule.

pub mod ai;
pub mod app;
pub mod error;
pub mod materialize;
pub mod models;

pub use error::{Error, Result};
