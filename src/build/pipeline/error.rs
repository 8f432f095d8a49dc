//! Pipeline error types.

use std::path::PathBuf;

use crate::build::render::RenderError;

/// Errors that can occur while processing one article.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("stage '{stage}' failed: {message}")]
    Stage { stage: String, message: String },
}

impl PipelineError {
    /// Create a stage-specific error.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }
}
