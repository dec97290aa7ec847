//! Gemini `generateContent` API client.
//!
//! Thin HTTP wrapper for `/models/{model}:generateContent`. Pure request
//! building and response parsing are split out for testability.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{GenerateRequest, GenerateResponse, LlmError, Message, Role};

const JSON_MIME_TYPE: &str = "application/json";

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url })
    }

    pub async fn generate(&self, model: &str, request: &GenerateRequest<'_>) -> Result<GenerateResponse, LlmError> {
        let url = format!("{}/models/{model}:generateContent", self.base_url);
        let body = build_request(request);

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_response(&text, model)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    contents: Vec<ApiContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<ApiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct ApiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<ApiPart<'a>>,
}

#[derive(Serialize)]
struct ApiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

// =============================================================================
// REQUEST BUILDING
// =============================================================================

fn role_name(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Model => "model",
    }
}

fn content_for(message: &Message) -> ApiContent<'_> {
    ApiContent { role: Some(role_name(message.role)), parts: vec![ApiPart { text: &message.text }] }
}

fn build_request<'a>(request: &GenerateRequest<'a>) -> ApiRequest<'a> {
    let system_instruction = request
        .system
        .filter(|s| !s.trim().is_empty())
        .map(|s| ApiContent { role: None, parts: vec![ApiPart { text: s }] });

    ApiRequest {
        contents: request.messages.iter().map(content_for).collect(),
        system_instruction,
        generation_config: GenerationConfig {
            temperature: request.temperature,
            response_mime_type: request.response_schema.map(|_| JSON_MIME_TYPE),
            response_schema: request.response_schema.map(to_gemini_schema),
        },
    }
}

/// Convert a JSON-schema style object into Gemini's OpenAPI subset, where
/// `type` values are upper-case enum names (`OBJECT`, `STRING`, ...).
pub(crate) fn to_gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    let converted = match (k.as_str(), v) {
                        ("type", Value::String(t)) => Value::String(t.to_ascii_uppercase()),
                        // Property names are user data, not schema keywords.
                        ("properties", Value::Object(props)) => Value::Object(
                            props
                                .iter()
                                .map(|(name, sub)| (name.clone(), to_gemini_schema(sub)))
                                .collect(),
                        ),
                        _ => to_gemini_schema(v),
                    };
                    (k.clone(), converted)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(to_gemini_schema).collect()),
        other => other.clone(),
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(json: &str, requested_model: &str) -> Result<GenerateResponse, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let Some(candidate) = api.candidates.into_iter().next() else {
        let reason = api
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "NO_CANDIDATES".to_string());
        return Err(LlmError::EmptyResponse { reason });
    };

    let finish_reason = candidate
        .finish_reason
        .unwrap_or_else(|| "STOP".to_string());
    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(LlmError::EmptyResponse { reason: finish_reason });
    }

    let (input_tokens, output_tokens) = api
        .usage_metadata
        .map_or((0, 0), |u| (u.prompt_token_count, u.candidates_token_count));

    Ok(GenerateResponse {
        text,
        model: api
            .model_version
            .unwrap_or_else(|| requested_model.to_string()),
        finish_reason,
        input_tokens,
        output_tokens,
    })
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
