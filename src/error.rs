use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Tagger Error: {0}")]
    Tagger(#[from] TaggerError),
    #[error("Configuration Error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Usage: {0}")]
    Usage(String),
    #[error("Upload ended without a result")]
    Incomplete,
}

// Errors raised along the upload -> tag fetch chain.
//
// Only `Encoding` and `Multipart` reach the caller of a full cycle, the
// rest degrade to an empty result inside the pipeline.
#[derive(Error, Debug)]
pub enum TaggerError {
    #[error("Failed to encode image: {0}")]
    Encoding(#[from] image::ImageError),
    #[error("Failed to build multipart body: {0}")]
    Multipart(String),
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl TaggerError {
    /// Whether the pipeline should fold this error into an empty result
    /// instead of handing it to the caller.
    pub fn degrades_to_empty(&self) -> bool {
        matches!(
            self,
            TaggerError::Transport(_) | TaggerError::MalformedResponse(_)
        )
    }
}
