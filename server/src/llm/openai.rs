//! OpenAI-compatible API client.
//!
//! Speaks `/chat/completions`, which most OpenAI-compatible gateways accept.
//! Structured output uses `response_format: json_schema` in strict mode.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{GenerateRequest, GenerateResponse, LlmError, Role};

const SCHEMA_NAME: &str = "response";

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url })
    }

    pub async fn generate(&self, model: &str, request: &GenerateRequest<'_>) -> Result<GenerateResponse, LlmError> {
        let body = build_request(model, request);
        let text = self.send_json("/chat/completions", &body).await?;
        parse_chat_completions_response(&text)
    }

    async fn send_json(&self, path: &str, body: &impl Serialize) -> Result<String, LlmError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
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
        Ok(text)
    }
}

// =============================================================================
// CHAT COMPLETIONS — wire types
// =============================================================================

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    messages: Vec<CcMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<CcResponseFormat>,
}

#[derive(Serialize)]
struct CcMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct CcResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: CcJsonSchema,
}

#[derive(Serialize)]
struct CcJsonSchema {
    name: &'static str,
    schema: Value,
    strict: bool,
}

fn build_request<'a>(model: &'a str, request: &GenerateRequest<'a>) -> CcRequest<'a> {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);
    if let Some(system) = request.system.filter(|s| !s.trim().is_empty()) {
        messages.push(CcMessage { role: "system", content: system });
    }
    for message in request.messages {
        let role = match message.role {
            Role::User => "user",
            Role::Model => "assistant",
        };
        messages.push(CcMessage { role, content: &message.text });
    }

    CcRequest {
        model,
        messages,
        temperature: request.temperature,
        response_format: request.response_schema.map(|schema| CcResponseFormat {
            format_type: "json_schema",
            json_schema: CcJsonSchema { name: SCHEMA_NAME, schema: to_strict_schema(schema), strict: true },
        }),
    }
}

/// Strict mode requires every object to forbid extra properties.
pub(crate) fn to_strict_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => {
            let mut out: serde_json::Map<String, Value> = map
                .iter()
                .map(|(k, v)| (k.clone(), to_strict_schema(v)))
                .collect();
            if map.get("type").and_then(Value::as_str) == Some("object") {
                out.entry("additionalProperties")
                    .or_insert(Value::Bool(false));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(to_strict_schema).collect()),
        other => other.clone(),
    }
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

pub(crate) fn parse_chat_completions_response(json_text: &str) -> Result<GenerateResponse, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let model = root
        .get("model")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default();
    let prompt_tokens = root
        .get("usage")
        .and_then(|u| u.get("prompt_tokens"))
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let completion_tokens = root
        .get("usage")
        .and_then(|u| u.get("completion_tokens"))
        .and_then(Value::as_u64)
        .unwrap_or(0);

    let Some(choice) = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("chat_completions: missing choices[0]".to_string()));
    };
    let finish_reason = choice
        .get("finish_reason")
        .and_then(Value::as_str)
        .unwrap_or("stop")
        .to_string();
    let message = choice.get("message").cloned().unwrap_or(Value::Null);

    if let Some(refusal) = message.get("refusal").and_then(Value::as_str) {
        return Err(LlmError::EmptyResponse { reason: format!("refusal: {refusal}") });
    }

    let text = message
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    if text.is_empty() {
        return Err(LlmError::EmptyResponse { reason: finish_reason });
    }

    Ok(GenerateResponse { text, model, finish_reason, input_tokens: prompt_tokens, output_tokens: completion_tokens })
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
