#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("extraction error: {reason}")]
    Extraction { reason: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
