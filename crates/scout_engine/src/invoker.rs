use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use scout_logging::{scout_debug, scout_info};
use serde::{Deserialize, Serialize};

use crate::{InvocationFailure, ModelInvocationError};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct InvokerSettings {
    pub api_base: String,
    pub model: String,
    pub api_key: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for InvokerSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            connect_timeout: Duration::from_secs(10),
            // Grounded answers routinely take tens of seconds.
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// Whether the model may run live web searches before answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grounding {
    #[default]
    Enabled,
    Disabled,
}

#[async_trait::async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(
        &self,
        prompt: &str,
        grounding: Grounding,
    ) -> Result<String, ModelInvocationError>;
}

/// `generateContent` client for the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiInvoker {
    settings: InvokerSettings,
}

impl GeminiInvoker {
    pub fn new(settings: InvokerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &InvokerSettings {
        &self.settings
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.api_base.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn build_client(&self) -> Result<reqwest::Client, ModelInvocationError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| ModelInvocationError::new(InvocationFailure::Network, err.to_string()))
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

#[async_trait::async_trait]
impl ModelInvoker for GeminiInvoker {
    async fn invoke(
        &self,
        prompt: &str,
        grounding: Grounding,
    ) -> Result<String, ModelInvocationError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ModelInvocationError::new(InvocationFailure::MissingApiKey, "no api key configured")
            })?;

        let tools = match grounding {
            Grounding::Enabled => vec![Tool {
                google_search: GoogleSearch {},
            }],
            Grounding::Disabled => Vec::new(),
        };
        let request = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
            tools,
        };
        let body = serde_json::to_vec(&request).map_err(|err| {
            ModelInvocationError::new(InvocationFailure::MalformedEnvelope, err.to_string())
        })?;

        scout_info!(
            "invoking {} (grounding {:?}, prompt_len={})",
            self.settings.model,
            grounding,
            prompt.len()
        );
        let client = self.build_client()?;
        let response = client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            let detail = serde_json::from_slice::<ErrorEnvelope>(&bytes)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(ModelInvocationError::new(
                InvocationFailure::HttpStatus(status.as_u16()),
                detail,
            ));
        }

        let parsed: GenerateResponse = serde_json::from_slice(&bytes).map_err(|err| {
            ModelInvocationError::new(InvocationFailure::MalformedEnvelope, err.to_string())
        })?;
        let text = response_text(parsed);
        if text.is_empty() {
            return Err(ModelInvocationError::new(
                InvocationFailure::EmptyResponse,
                "no text generated",
            ));
        }
        scout_debug!("model answered with {} bytes of text", text.len());
        Ok(text)
    }
}

/// Concatenate the non-thought text parts of the first candidate.
fn response_text(response: GenerateResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|part| !part.thought)
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default()
}

fn map_reqwest_error(err: reqwest::Error) -> ModelInvocationError {
    if err.is_timeout() {
        return ModelInvocationError::new(InvocationFailure::Timeout, err.to_string());
    }
    ModelInvocationError::new(InvocationFailure::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let invoker = GeminiInvoker::new(InvokerSettings {
            api_base: "http://localhost:9/".to_string(),
            ..InvokerSettings::default()
        });
        assert_eq!(
            invoker.endpoint(),
            "http://localhost:9/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn grounded_request_serializes_google_search_tool() {
        let request = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart { text: "ciao" }],
            }],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "ciao"}]}],
                "tools": [{"google_search": {}}]
            })
        );
    }

    #[test]
    fn thought_parts_are_skipped() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[
                {"text":"pensiero","thought":true},
                {"text":"[{\"keyword\":"},
                {"text":"\"a\"}]"}
            ]}}]}"#,
        )
        .unwrap();
        assert_eq!(response_text(response), "[{\"keyword\":\"a\"}]");
    }

    #[test]
    fn missing_candidates_yield_empty_text() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response_text(response), "");
    }
}
