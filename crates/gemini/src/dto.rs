//! Wire types for the `generateContent` and `models` endpoints.
//!
//! Upstream payloads are decoded into these structs at the boundary. Every
//! nested field that the API may omit is optional or defaulted, so a shape
//! mismatch surfaces as [`GeminiApiError::MalformedResponse`] from
//! [`GenerateContentResponse::into_text`] rather than a panic deep inside a
//! handler.

use serde::{Deserialize, Serialize};

use crate::api::GeminiApiError;

/// Request body for `POST /v1beta/models/{model}:generateContent`.
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequestContent<'a> {
    pub parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart<'a> {
    pub text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    /// A single-turn request carrying one text part.
    pub fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

/// Response body of `generateContent`.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn into_text(self) -> Result<String, GeminiApiError> {
        let candidate = self.candidates.into_iter().next().ok_or_else(|| {
            GeminiApiError::MalformedResponse("response contained no candidates".into())
        })?;

        let finish_reason = candidate.finish_reason;
        candidate
            .content
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| {
                GeminiApiError::MalformedResponse(match finish_reason {
                    Some(reason) => format!("first candidate has no text part (finish reason: {reason})"),
                    None => "first candidate has no text part".into(),
                })
            })
    }
}

/// Response body of `GET /v1beta/models`.
#[derive(Debug, Deserialize)]
pub struct ListModelsResponse {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    /// Resource name, e.g. `models/gemini-2.0-flash`.
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn decode(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn request_serializes_single_text_part() {
        let body = serde_json::to_value(GenerateContentRequest::from_prompt("hello")).unwrap();
        assert_eq!(body, json!({ "contents": [{ "parts": [{ "text": "hello" }] }] }));
    }

    #[test]
    fn extracts_first_text_part() {
        let response = decode(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "पहिली" }, { "text": "दुसरी" }] } },
                { "content": { "parts": [{ "text": "other" }] } }
            ]
        }));
        assert_eq!(response.into_text().unwrap(), "पहिली");
    }

    #[test]
    fn missing_candidates_is_malformed() {
        let response = decode(json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
        assert_matches!(response.into_text(), Err(GeminiApiError::MalformedResponse(_)));
    }

    #[test]
    fn candidate_without_text_reports_finish_reason() {
        let response = decode(json!({
            "candidates": [{ "content": { "parts": [] }, "finishReason": "SAFETY" }]
        }));
        let err = response.into_text().unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn list_models_tolerates_missing_fields() {
        let parsed: ListModelsResponse = serde_json::from_value(json!({
            "models": [{ "name": "models/gemini-2.0-flash", "displayName": "Gemini 2.0 Flash" },
                       { "name": "models/embedding-001" }]
        }))
        .unwrap();
        assert_eq!(parsed.models.len(), 2);
        assert!(parsed.models[1].display_name.is_none());
        assert!(parsed.next_page_token.is_none());
    }
}
