use async_trait::async_trait;
use futures_util::future::join_all;
use serde::Deserialize;
use serde_json::json;
use slidesmith_common::Presentation;
use std::time::Duration;

use crate::error::{GenAiError, Result};
use crate::fallback::{fallback_presentation, placeholder_image_url};
use crate::schema::{presentation_prompt, presentation_schema, RawPresentation};
use crate::{ImageGenerator, PresentationGenerator};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";

#[derive(Debug, Clone)]
pub struct GenAiConfig {
    pub api_key: Option<String>,
    pub text_model: String,
    pub image_model: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

/// Client for the Gemini text and Imagen image endpoints.
pub struct GeminiClient {
    http: reqwest::Client,
    config: GenAiConfig,
}

impl GeminiClient {
    pub fn new(config: GenAiConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        if config.api_key.is_none() {
            tracing::warn!("no API key set, generation will use mock data");
        }
        Ok(Self { http, config })
    }

    pub fn has_credentials(&self) -> bool {
        self.config.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    fn api_key(&self) -> Result<&str> {
        match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(GenAiError::MissingApiKey),
        }
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!(
            "{}/v1beta/models/{model}:{method}",
            self.config.api_base.trim_end_matches('/')
        )
    }

    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<reqwest::Response> {
        let key = self.api_key()?;
        tracing::debug!("POST {url}");
        let resp = self
            .http
            .post(url)
            .header("x-goog-api-key", key)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenAiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }

    /// Ask the model for a deck outline without images.
    pub async fn request_outline(&self, topic: &str) -> Result<RawPresentation> {
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": presentation_prompt(topic) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": presentation_schema(),
            },
        });
        let url = self.endpoint(&self.config.text_model, "generateContent");
        let resp: GenerateContentResponse = self.post_json(&url, &body).await?.json().await?;

        let text = resp
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.text)
            .ok_or(GenAiError::Empty("candidate text"))?;

        let raw: RawPresentation = serde_json::from_str(text.trim())?;
        if raw.slides.is_empty() {
            return Err(GenAiError::Empty("slides"));
        }
        Ok(raw)
    }

    pub async fn try_generate_presentation(&self, topic: &str) -> Result<Presentation> {
        let raw = self.request_outline(topic).await?;
        tracing::info!(
            "generated outline {:?} with {} slides",
            raw.title,
            raw.slides.len()
        );
        let images = join_all(
            raw.slides
                .iter()
                .map(|slide| self.generate_image(&slide.image_prompt)),
        )
        .await;
        Ok(raw.into_presentation(images))
    }

    pub async fn try_generate_image(&self, prompt: &str) -> Result<String> {
        let body = json!({
            "instances": [{ "prompt": prompt }],
            "parameters": {
                "sampleCount": 1,
                "aspectRatio": "16:9",
                "outputOptions": { "mimeType": "image/jpeg" },
            },
        });
        let url = self.endpoint(&self.config.image_model, "predict");
        let resp: PredictResponse = self.post_json(&url, &body).await?.json().await?;

        let prediction = resp
            .predictions
            .into_iter()
            .find(|p| p.bytes_base64_encoded.is_some())
            .ok_or(GenAiError::Empty("image"))?;
        let mime = prediction
            .mime_type
            .unwrap_or_else(|| "image/jpeg".to_string());
        let bytes = prediction.bytes_base64_encoded.unwrap_or_default();
        Ok(format!("data:{mime};base64,{bytes}"))
    }
}

#[async_trait]
impl PresentationGenerator for GeminiClient {
    async fn generate_presentation(&self, topic: &str) -> Presentation {
        if !self.has_credentials() {
            return fallback_presentation();
        }
        match self.try_generate_presentation(topic).await {
            Ok(presentation) => presentation,
            Err(e) => {
                tracing::error!("error generating presentation: {e}");
                fallback_presentation()
            }
        }
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate_image(&self, prompt: &str) -> String {
        if !self.has_credentials() {
            return placeholder_image_url(prompt);
        }
        match self.try_generate_image(prompt).await {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("error generating image: {e}");
                placeholder_image_url(prompt)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> GenAiConfig {
        GenAiConfig {
            api_key: Some("test-key".to_string()),
            // Port 1 on loopback refuses connections immediately.
            api_base: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(5),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_no_key_uses_fallback_deck() {
        let client = GeminiClient::new(GenAiConfig::default()).unwrap();
        let deck = client.generate_presentation("Quantum computing").await;
        assert_eq!(deck.title, "The Future of Renewable Energy");
        assert_eq!(deck.len(), 5);
    }

    #[tokio::test]
    async fn test_no_key_uses_placeholder_image() {
        let client = GeminiClient::new(GenAiConfig::default()).unwrap();
        let url = client.generate_image("city at night").await;
        assert_eq!(url, "https://picsum.photos/seed/city%20at%20night/1280/720");
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back() {
        let client = GeminiClient::new(unreachable_config()).unwrap();
        assert!(client.try_generate_presentation("x").await.is_err());

        let deck = client.generate_presentation("Quantum computing").await;
        assert_eq!(deck, fallback_presentation());

        let url = client.generate_image("grid").await;
        assert_eq!(url, placeholder_image_url("grid"));
    }

    #[test]
    fn test_endpoint_format() {
        let client = GeminiClient::new(GenAiConfig {
            api_base: "https://example.com/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            client.endpoint("gemini-2.5-flash", "generateContent"),
            "https://example.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
