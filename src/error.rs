//! Error types for the quiz.

use std::io;

use thiserror::Error;

/// Why remote question retrieval failed. Always recovered by falling back.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("question service answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("question payload is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("question payload has no results field")]
    MissingResults,
    #[error("question service returned no questions")]
    NoQuestions,
}

/// Error type for quiz operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    /// IO error during quiz execution.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The log subscriber could not be installed.
    #[error("failed to set up logging: {0}")]
    Logging(String),
}
