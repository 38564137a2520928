use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenAiError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generative API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response contained no {0}")]
    Empty(&'static str),
}

pub type Result<T> = std::result::Result<T, GenAiError>;
