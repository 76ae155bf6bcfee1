use anyhow::{bail, Context};
use log::debug;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::runtime::Runtime;

use crate::{
    config::OpenAiSettings,
    fetcher::{CompletionClient, CompletionRequest},
};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

impl<'a> ChatRequest<'a> {
    fn new(model: &'a str, request: &'a CompletionRequest) -> Self {
        Self {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Blocking client for an OpenAI compatible chat completions endpoint
pub struct OpenAiClient {
    rt: Runtime,
    http: Client,
    api_key: Option<String>,
    model: String,
    url: String,
}

impl OpenAiClient {
    pub fn new(settings: &OpenAiSettings) -> anyhow::Result<Self> {
        let rt = Runtime::new().context("Failed to create async runtime")?;
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            rt,
            http,
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            url: settings.base_url.clone(),
        })
    }

    async fn do_complete(&self, request: &CompletionRequest) -> anyhow::Result<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            bail!("OPENAI_API_KEY is not set");
        };
        let body = ChatRequest::new(&self.model, request);
        debug!("POST {} with model {}", self.url, self.model);
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .context("OpenAI request failed")?;
        let status = response.status();
        let text = response
            .text()
            .await
            .context("Failed to read OpenAI response body")?;
        parse_completion(status, &text)
    }
}

impl CompletionClient for OpenAiClient {
    fn complete(&self, request: &CompletionRequest) -> anyhow::Result<String> {
        self.rt.block_on(self.do_complete(request))
    }
}

/// Extracts the first choice's text or describes why there is none
fn parse_completion(status: StatusCode, body: &str) -> anyhow::Result<String> {
    if !status.is_success() {
        if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(body) {
            bail!("OpenAI API error ({status}): {}", error_response.error.message);
        }
        bail!("OpenAI API error ({status}): {body}");
    }

    let response: ChatResponse =
        serde_json::from_str(body).context("Failed to parse OpenAI response")?;
    let Some(choice) = response.choices.into_iter().next() else {
        bail!("OpenAI response contained no choices");
    };
    match choice.message.content {
        Some(content) if !content.is_empty() => Ok(content),
        _ => bail!("OpenAI response contained no content"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(api_key: Option<&str>) -> OpenAiSettings {
        OpenAiSettings {
            api_key: api_key.map(str::to_string),
            model: "gpt-4".to_string(),
            base_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
        }
    }

    #[test]
    fn parses_first_choice() {
        let body = r#"{
            "id": "chatcmpl-1",
            "model": "gpt-4",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "**Ämne:** DNS"}, "finish_reason": "stop"},
                {"index": 1, "message": {"role": "assistant", "content": "other"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 1, "completion_tokens": 2, "total_tokens": 3}
        }"#;
        let actual = parse_completion(StatusCode::OK, body).unwrap();
        assert_eq!(actual, "**Ämne:** DNS");
    }

    #[test]
    fn error_body_message_is_used() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error", "code": "invalid_api_key"}}"#;
        let err = parse_completion(StatusCode::UNAUTHORIZED, body).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("401"));
        assert!(msg.contains("Incorrect API key provided"));
    }

    #[test]
    fn non_json_error_body_is_kept() {
        let err = parse_completion(StatusCode::BAD_GATEWAY, "upstream down").unwrap_err();
        assert!(format!("{err:#}").contains("upstream down"));
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(parse_completion(StatusCode::OK, "<html>").is_err());
        assert!(parse_completion(StatusCode::OK, r#"{"choices": []}"#).is_err());
        assert!(
            parse_completion(StatusCode::OK, r#"{"choices": [{"message": {"content": null}}]}"#)
                .is_err()
        );
    }

    #[test]
    fn missing_api_key_fails_without_network() {
        let client = OpenAiClient::new(&settings(None)).unwrap();
        let err = client
            .complete(&CompletionRequest::new("prompt"))
            .unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn request_serializes_as_chat_completion() {
        let request = CompletionRequest::new("hej");
        let body = ChatRequest::new("gpt-4", &request);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hej");
        assert_eq!(json["max_tokens"], 1000);
    }
}
