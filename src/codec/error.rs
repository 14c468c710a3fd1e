use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("line {line}: {message}")]
    Line { line: usize, message: String },
}

impl CodecError {
    /// 1-based input line the error refers to, when known.
    pub fn line(&self) -> Option<usize> {
        match self {
            CodecError::Line { line, .. } => Some(*line),
            _ => None,
        }
    }
}
