//! Runtime configuration for the quiz and its question source.

use std::time::Duration;

/// Ten multiple-choice questions from the "Science: Computers" category.
pub const DEFAULT_API_URL: &str = "https://opentdb.com/api.php?amount=10&category=18&type=multiple";

/// Seconds allowed per question.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 30;

/// How long answer feedback stays on screen before moving on.
pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(1500);

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Session timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizConfig {
    pub time_limit_secs: u32,
    pub feedback_delay: Duration,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            feedback_delay: DEFAULT_FEEDBACK_DELAY,
        }
    }
}

/// Where questions come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub api_url: String,
    /// Skip the network and use the built-in questions.
    pub offline: bool,
    pub request_timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            offline: false,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
