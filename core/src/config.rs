use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use slidesmith_genai::client::{DEFAULT_API_BASE, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL};
use slidesmith_genai::GenAiConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub text_model: String,
    pub image_model: String,
    pub api_base: String,
    pub request_timeout_secs: u64,
    /// Where the user table and current session live.
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .map(|d| d.join("slidesmith"))
            .unwrap_or_else(|| PathBuf::from(".slidesmith"));
        Self {
            api_key: None,
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: 120,
            data_dir,
            export_dir: PathBuf::from("."),
            log_path: None,
        }
    }
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("slidesmith").join("config.json"))
    }

    /// Defaults, then the config file if one exists, then the environment.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY").or_else(|_| std::env::var("API_KEY")) {
            if !key.is_empty() {
                self.api_key = Some(key);
            }
        }

        if let Ok(model) = std::env::var("SLIDESMITH_MODEL") {
            self.text_model = model;
        }

        if let Ok(model) = std::env::var("SLIDESMITH_IMAGE_MODEL") {
            self.image_model = model;
        }

        if let Ok(base) = std::env::var("SLIDESMITH_API_BASE") {
            self.api_base = base;
        }

        if let Ok(dir) = std::env::var("SLIDESMITH_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = std::env::var("SLIDESMITH_EXPORT_DIR") {
            self.export_dir = PathBuf::from(dir);
        }

        if let Ok(path) = std::env::var("SLIDESMITH_LOG_PATH") {
            self.log_path = Some(PathBuf::from(path));
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("slidesmith.log"))
    }

    pub fn genai(&self) -> GenAiConfig {
        GenAiConfig {
            api_key: self.api_key.clone(),
            text_model: self.text_model.clone(),
            image_model: self.image_model.clone(),
            api_base: self.api_base.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"text_model": "gemini-pro", "export_dir": "/tmp/decks"}"#)
            .unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.text_model, "gemini-pro");
        assert_eq!(config.export_dir, PathBuf::from("/tmp/decks"));
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_genai_config_carries_models() {
        let config = Config {
            api_key: Some("k".into()),
            request_timeout_secs: 7,
            ..Default::default()
        };
        let genai = config.genai();
        assert_eq!(genai.api_key.as_deref(), Some("k"));
        assert_eq!(genai.timeout, Duration::from_secs(7));
        assert_eq!(genai.text_model, DEFAULT_TEXT_MODEL);
    }
}
