//! services/api/src/adapters/gemini_llm.rs
//!
//! This module contains the adapter for the syllabus-analysis LLM.
//! It implements the `SyllabusAnalysisService` port from the `core` crate by
//! calling Gemini's `generateContent` endpoint.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use syllabus_core::{
    analysis::{build_analysis_prompt, parse_analysis_reply, truncate_chars},
    domain::Course,
    ports::{AnalysisError, SyllabusAnalysisService},
};
use tracing::{debug, error};

const FALLBACK_REMOTE_ERROR: &str = "API error occurred";

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: RemoteError,
}

#[derive(Debug, Deserialize)]
struct RemoteError {
    #[serde(default)]
    message: String,
}

impl GenerateContentRequest {
    fn from_prompt(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        }
    }
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `SyllabusAnalysisService` against the Gemini API.
#[derive(Clone)]
pub struct GeminiAnalysisAdapter {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiAnalysisAdapter {
    /// Creates a new `GeminiAnalysisAdapter`.
    pub fn new(client: reqwest::Client, base_url: String, model: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            model,
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Turns the HTTP status and raw body of a `generateContent` call into the
/// model's reply text.
pub fn reply_text(status: StatusCode, body: &str) -> Result<String, AnalysisError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .map(|envelope| envelope.error.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| FALLBACK_REMOTE_ERROR.to_string());
        return Err(AnalysisError::new(message));
    }

    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| AnalysisError::new(format!("unexpected response body: {}", e)))?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text)
        .ok_or_else(|| AnalysisError::new("model response contained no text content"))
}

//=========================================================================================
// `SyllabusAnalysisService` Trait Implementation
//=========================================================================================

#[async_trait]
impl SyllabusAnalysisService for GeminiAnalysisAdapter {
    async fn analyze(&self, text: &str, file_name: &str) -> Result<Course, AnalysisError> {
        debug!(file_name, length = text.chars().count(), "Analyzing extracted syllabus text");
        debug!("First 500 chars: {}", truncate_chars(text, 500));

        let request = GenerateContentRequest::from_prompt(build_analysis_prompt(text));

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Analysis request failed: {:?}", e);
                AnalysisError::new(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::new(e.to_string()))?;

        let result = reply_text(status, &body).and_then(|reply| {
            debug!("Model reply: {}", reply);
            parse_analysis_reply(&reply)
        });

        match result {
            Ok(analysis) => Ok(Course::from_analysis(file_name, analysis)),
            Err(e) => {
                error!(%status, "Analysis error details: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_yields_first_part_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"first"},{"text":"second"}]}}]}"#;
        assert_eq!(reply_text(StatusCode::OK, body).unwrap(), "first");
    }

    #[test]
    fn empty_candidates_is_an_error() {
        let err = reply_text(StatusCode::OK, r#"{"candidates":[]}"#).unwrap_err();
        assert_eq!(err.message(), "model response contained no text content");
    }

    #[test]
    fn remote_error_message_is_carried() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        let err = reply_text(StatusCode::BAD_REQUEST, body).unwrap_err();
        assert_eq!(err.message(), "API key not valid.");
    }

    #[test]
    fn remote_error_without_message_uses_fallback() {
        let err = reply_text(StatusCode::SERVICE_UNAVAILABLE, "<html>down</html>").unwrap_err();
        assert_eq!(err.message(), FALLBACK_REMOTE_ERROR);
    }

    #[test]
    fn endpoint_joins_base_url_and_model() {
        let adapter = GeminiAnalysisAdapter::new(
            reqwest::Client::new(),
            "http://localhost:9000/v1beta/".into(),
            "gemini-test".into(),
            "k".into(),
        );
        assert_eq!(
            adapter.endpoint(),
            "http://localhost:9000/v1beta/models/gemini-test:generateContent"
        );
    }
}
