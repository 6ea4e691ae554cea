use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscueError {
    #[error("could not determine a valid video duration (got {0})")]
    InvalidDuration(f64),

    #[error("unknown profanity mode '{0}', expected one of: verbatim, mask, beep")]
    UnknownProfanityMode(String),

    #[error("invalid text pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("asset {asset} failed to process: {reason}")]
    AssetFailed { asset: String, reason: String },

    #[error("asset {asset} was not ready after {attempts} status checks")]
    PollExhausted { asset: String, attempts: u32 },

    #[error("analysis was cancelled")]
    Cancelled,

    #[error("analysis service error: {0}")]
    Service(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TranscueError>;
