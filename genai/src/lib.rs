//! Generation and image collaborators. Every public entry point resolves to
//! *something*: failures are logged and replaced by the fixed fallback deck
//! or a placeholder image.

pub mod client;
pub mod error;
pub mod fallback;
pub mod schema;

use async_trait::async_trait;
use slidesmith_common::Presentation;

pub use client::{GeminiClient, GenAiConfig};
pub use error::GenAiError;
pub use fallback::{fallback_presentation, placeholder_image_url};

#[async_trait]
pub trait PresentationGenerator: Send + Sync {
    async fn generate_presentation(&self, topic: &str) -> Presentation;
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Returns an image reference: a URL or a `data:` URI.
    async fn generate_image(&self, prompt: &str) -> String;
}
