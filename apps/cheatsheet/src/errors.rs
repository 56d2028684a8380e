use thiserror::Error;

use crate::boxes::ParseError;
use crate::layout::placement::CapacityError;
use crate::llm_client::LlmError;
use crate::render::RenderError;

/// Application-level error type.
/// Every pipeline stage error converts into it, so entry points can use `?` throughout.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Capacity error: {0}")]
    Capacity(#[from] CapacityError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Could not load lecture file {path}: {message}")]
    LectureLoad { path: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Capacity(e) => AppError::Capacity(e),
            RenderError::InvalidConfig(msg) => AppError::Validation(msg),
        }
    }
}

impl AppError {
    /// Stable machine-readable code, logged alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Parse(_) => "PARSE_ERROR",
            AppError::Capacity(_) => "CAPACITY_ERROR",
            AppError::Llm(_) => "LLM_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::LectureLoad { .. } => "LECTURE_LOAD_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
