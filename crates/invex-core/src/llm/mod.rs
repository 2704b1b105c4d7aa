//! Chat model client abstraction.
//!
//! The pipeline talks to the hosted chat-completion endpoint through the
//! [`ChatClient`] trait so tests can substitute a canned client for the
//! network-backed one.

mod openai;

pub use openai::OpenAiChatClient;

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ModelError;

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// One part of a user message.
#[derive(Debug, Clone)]
pub enum ContentPart {
    /// Plain text.
    Text(String),
    /// A base64-encoded PNG image sent inline.
    ImagePng(String),
}

/// A single chat completion request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Optional system instruction.
    pub system: Option<String>,
    /// User message parts, in order.
    pub parts: Vec<ContentPart>,
    /// Generation cap; `None` keeps the model default.
    pub max_tokens: Option<u32>,
}

/// Client for a hosted chat-completion model.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send one request and return the first choice's message content.
    async fn complete(&self, request: ChatRequest) -> Result<String>;
}

/// Queue-backed client for tests; replies with pushed responses in order.
#[derive(Default)]
pub struct MockChatClient {
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockChatClient {
    /// Queue the next reply.
    pub fn push_response(&self, response: impl Into<String>) {
        self.responses
            .lock()
            .expect("mock response lock poisoned")
            .push_back(response.into());
    }

    /// Requests seen so far, in call order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .expect("mock request lock poisoned")
            .clone()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        self.requests
            .lock()
            .expect("mock request lock poisoned")
            .push(request);
        self.responses
            .lock()
            .expect("mock response lock poisoned")
            .pop_front()
            .ok_or(ModelError::NoChoices)
    }
}
