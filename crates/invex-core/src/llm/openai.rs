//! Chat-completion client for OpenAI-compatible endpoints.

use serde::{Deserialize, Serialize};

use super::{ChatClient, ChatRequest, ContentPart, Result};
use crate::error::ModelError;

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// Built once at startup from environment-supplied settings and reused,
/// read-only, for all requests. No request timeout is configured; the
/// only bound on a call is the caller's `max_tokens` cap.
pub struct OpenAiChatClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl OpenAiChatClient {
    /// Create a client for the given endpoint, credential and model id.
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    fn build_payload(&self, request: &ChatRequest) -> WireRequest<'_> {
        let mut messages = Vec::with_capacity(2);

        if let Some(system) = &request.system {
            messages.push(WireMessage {
                role: "system",
                content: WireContent::Text(system.clone()),
            });
        }

        let parts: Vec<WirePart> = request
            .parts
            .iter()
            .map(|part| match part {
                ContentPart::Text(text) => WirePart::Text { text: text.clone() },
                ContentPart::ImagePng(encoded) => WirePart::ImageUrl {
                    image_url: WireImageUrl {
                        url: format!("data:image/png;base64,{encoded}"),
                    },
                },
            })
            .collect();

        messages.push(WireMessage {
            role: "user",
            content: WireContent::Parts(parts),
        });

        WireRequest {
            model: &self.model,
            messages,
            max_tokens: request.max_tokens,
        }
    }
}

#[async_trait::async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        let payload = self.build_payload(&request);
        let url = format!("{}/chat/completions", self.api_base);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        let raw: WireResponse = response.json().await?;
        let choice = raw
            .choices
            .into_iter()
            .next()
            .ok_or(ModelError::NoChoices)?;
        choice.message.content.ok_or(ModelError::EmptyContent)
    }
}

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: WireContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WireContent {
    Text(String),
    Parts(Vec<WirePart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum WirePart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: WireImageUrl },
}

#[derive(Debug, Serialize)]
struct WireImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct WireChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client() -> OpenAiChatClient {
        OpenAiChatClient::new("https://api.openai.com/v1/", "sk-test", "gpt-4.1")
    }

    #[test]
    fn trailing_slash_is_stripped_from_api_base() {
        assert_eq!(client().api_base, "https://api.openai.com/v1");
    }

    #[test]
    fn payload_carries_system_message_and_inline_image() {
        let request = ChatRequest {
            system: Some("be precise".to_string()),
            parts: vec![
                ContentPart::Text("transcribe this".to_string()),
                ContentPart::ImagePng("QUJD".to_string()),
            ],
            max_tokens: Some(2000),
        };

        let value = serde_json::to_value(client().build_payload(&request)).unwrap();
        assert_eq!(value["model"], "gpt-4.1");
        assert_eq!(value["max_tokens"], 2000);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][0]["content"], "be precise");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"][0]["type"], "text");
        assert_eq!(
            value["messages"][1]["content"][1]["image_url"]["url"],
            "data:image/png;base64,QUJD"
        );
    }

    #[test]
    fn payload_omits_cap_and_system_when_absent() {
        let request = ChatRequest {
            system: None,
            parts: vec![ContentPart::Text("hello".to_string())],
            max_tokens: None,
        };

        let value = serde_json::to_value(client().build_payload(&request)).unwrap();
        assert!(value.get("max_tokens").is_none());
        assert_eq!(value["messages"].as_array().unwrap().len(), 1);
        assert_eq!(value["messages"][0]["role"], "user");
    }

    #[test]
    fn response_with_choices_deserializes() {
        let raw: WireResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"hi"}}]}"#,
        )
        .unwrap();
        assert_eq!(raw.choices[0].message.content.as_deref(), Some("hi"));
    }

    #[test]
    fn response_without_choices_deserializes_empty() {
        let raw: WireResponse = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(raw.choices.is_empty());
    }
}
