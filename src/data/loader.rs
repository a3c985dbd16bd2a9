use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use super::fallback_questions;
use crate::config::SourceConfig;
use crate::error::FetchError;

/// A question as served by Open Trivia DB. Text is HTML-entity encoded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawQuestion {
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

impl RawQuestion {
    pub fn new(question: &str, correct_answer: &str, incorrect_answers: &[&str]) -> Self {
        Self {
            question: question.to_string(),
            correct_answer: correct_answer.to_string(),
            incorrect_answers: incorrect_answers.iter().map(|a| a.to_string()).collect(),
            category: None,
            difficulty: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    response_code: Option<u8>,
    results: Option<Vec<RawQuestion>>,
}

/// Fetch questions from the configured service.
///
/// # Errors
///
/// Returns `FetchError` when the request fails, the status is not a
/// success, or the payload carries no usable questions.
pub async fn fetch_remote(config: &SourceConfig) -> Result<Vec<RawQuestion>, FetchError> {
    let client = Client::builder().timeout(config.request_timeout).build()?;
    let response = client.get(&config.api_url).send().await?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    let body = response.bytes().await?;
    let payload: ApiResponse = serde_json::from_slice(&body)?;
    let results = payload.results.ok_or(FetchError::MissingResults)?;

    if results.is_empty() {
        return Err(FetchError::NoQuestions);
    }
    if let Some(code) = payload.response_code.filter(|code| *code != 0) {
        warn!(code, "question service reported a non-zero response code");
    }

    Ok(results)
}

/// Fetch questions, substituting the built-in set on any failure.
pub async fn fetch_or_fallback(config: &SourceConfig) -> Vec<RawQuestion> {
    if config.offline {
        info!("offline mode, using built-in questions");
        return fallback_questions();
    }

    match fetch_remote(config).await {
        Ok(questions) => {
            info!(count = questions.len(), url = %config.api_url, "loaded remote questions");
            questions
        }
        Err(err) => {
            warn!(error = %err, "question service unreachable, using built-in questions");
            fallback_questions()
        }
    }
}
