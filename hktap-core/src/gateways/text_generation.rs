use crate::entities::*;
use thiserror::Error;

/// A callable capability that is offered to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    // JSON schema of the arguments
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub history: Vec<Message>,
    pub user_message: String,
    pub tools: Vec<ToolDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub name: String,
    // Unparsed JSON text as emitted by the model
    pub arguments: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Error)]
pub enum TextGenerationError {
    #[error("No API key configured for the text generation service")]
    MissingCredential,
    #[error("The text generation service responded with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Unexpected response from the text generation service: {0}")]
    MalformedEnvelope(String),
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

pub trait TextGenerationGateway {
    fn complete(&self, request: &CompletionRequest) -> Result<Completion, TextGenerationError>;
}
