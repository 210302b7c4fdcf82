use std::time::Duration;

use hktap_core::{entities::*, gateways::text_generation::*};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Chat completions via openrouter.ai.
#[derive(Debug, Clone)]
pub struct OpenRouter {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Sent as `HTTP-Referer` header.
    pub referer: String,
    /// Sent as `X-Title` header.
    pub title: String,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct Tool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: FunctionDefinition<'a>,
}

#[derive(Debug, Serialize)]
struct FunctionDefinition<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Option<Vec<Choice>>,
    error: Option<JsonError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ResponseToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ResponseToolCall {
    function: ResponseFunction,
}

#[derive(Debug, Deserialize)]
struct ResponseFunction {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Deserialize, thiserror::Error)]
#[error("{message}")]
struct JsonError {
    message: String,
    code: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct JsonErrorEnvelope {
    error: JsonError,
}

fn role_name(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
    }
}

impl OpenRouter {
    fn build_request_body(
        &self,
        request: &CompletionRequest,
    ) -> Result<serde_json::Value, TextGenerationError> {
        let CompletionRequest {
            system_prompt,
            history,
            user_message,
            tools,
        } = request;
        let messages = std::iter::once(ChatMessage {
            role: "system",
            content: system_prompt,
        })
        .chain(history.iter().map(|m| ChatMessage {
            role: role_name(m.role),
            content: &m.content,
        }))
        .chain(std::iter::once(ChatMessage {
            role: "user",
            content: user_message,
        }))
        .collect();
        let tools = tools
            .iter()
            .map(|t| Tool {
                kind: "function",
                function: FunctionDefinition {
                    name: &t.name,
                    description: &t.description,
                    parameters: &t.parameters,
                },
            })
            .collect();
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            tools,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };
        serde_json::to_value(body).map_err(|err| {
            TextGenerationError::Transport(anyhow::Error::new(err).context("Unable to encode request"))
        })
    }

    #[cfg(not(test))]
    fn send_raw(&self, api_key: &str, body: &serde_json::Value) -> anyhow::Result<(u16, String)> {
        let url = format!("{}/chat/completions", self.api_base_url.trim_end_matches('/'));
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        let response = client
            .post(url)
            .bearer_auth(api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(body)
            .send()?;
        let status = response.status().as_u16();
        let text = response.text()?;
        Ok((status, text))
    }

    /// Don't actually send requests while running the tests.
    #[cfg(test)]
    fn send_raw(&self, _: &str, body: &serde_json::Value) -> anyhow::Result<(u16, String)> {
        log::debug!("Would send chat completion request: {body}");
        Ok((
            200,
            r#"{"choices":[{"message":{"role":"assistant","content":"Not sent"}}]}"#.to_owned(),
        ))
    }
}

fn parse_completion_response(status: u16, body: &str) -> Result<Completion, TextGenerationError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<JsonErrorEnvelope>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.chars().take(200).collect());
        return Err(TextGenerationError::Status { status, message });
    }
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|err| TextGenerationError::MalformedEnvelope(err.to_string()))?;
    if let Some(err) = response.error {
        return Err(TextGenerationError::Status {
            status: err.code.unwrap_or(status),
            message: err.message,
        });
    }
    let message = response
        .choices
        .and_then(|choices| choices.into_iter().next())
        .map(|c| c.message)
        .ok_or_else(|| TextGenerationError::MalformedEnvelope("No choices in response".into()))?;
    let tool_calls = message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|c| ToolCall {
            name: c.function.name,
            arguments: c.function.arguments,
        })
        .collect();
    Ok(Completion {
        content: message.content,
        tool_calls,
    })
}

impl TextGenerationGateway for OpenRouter {
    fn complete(&self, request: &CompletionRequest) -> Result<Completion, TextGenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(TextGenerationError::MissingCredential)?;
        log::debug!(
            "Requesting chat completion from {} with tools [{}]",
            self.model,
            request.tools.iter().map(|t| &t.name).join(", ")
        );
        let body = self.build_request_body(request)?;
        let (status, text) = self.send_raw(api_key, &body)?;
        let completion = parse_completion_response(status, &text)?;
        log::debug!(
            "Received chat completion with {} tool call(s)",
            completion.tool_calls.len()
        );
        Ok(completion)
    }
}
