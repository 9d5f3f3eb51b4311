use async_openai::{
    config::OpenAIConfig,
    types::{ChatCompletionRequestMessageArgs, CreateChatCompletionRequestArgs, Role},
    Client,
};
use async_trait::async_trait;

use crate::config::Config;
use crate::error::{ConfigError, GenerationError};

use super::TextGenerator;

/// Chat-completions client. Gemini is reached through its
/// OpenAI-compatible endpoint.
pub struct CompletionClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl CompletionClient {
    /// `http` bounds each request; a stalled service surfaces as
    /// `GenerationError::Api` once its timeout elapses.
    pub fn new(api_base: &str, api_key: &str, model: &str, http: reqwest::Client) -> Self {
        let config = OpenAIConfig::new()
            .with_api_base(api_base.trim_end_matches('/'))
            .with_api_key(api_key);

        Self {
            client: Client::with_config(config).with_http_client(http),
            model: model.to_string(),
        }
    }

    pub fn from_config(config: &Config, http: reqwest::Client) -> Result<Self, ConfigError> {
        let api_key = config.require_gemini_api_key()?;
        Ok(Self::new(
            &config.gemini_api_base,
            api_key,
            &config.gemini_model,
            http,
        ))
    }
}

#[async_trait]
impl TextGenerator for CompletionClient {
    async fn run_prompt(&self, prompt: &str) -> Result<String, GenerationError> {
        let req = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([ChatCompletionRequestMessageArgs::default()
                .role(Role::User)
                .content(prompt)
                .build()?
                .into()])
            .build()?;

        tracing::debug!("Sending {} byte prompt to {}", prompt.len(), self.model);
        let resp = self.client.chat().create(req).await?;

        resp.choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or(GenerationError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::client::build_http_client;

    fn http() -> reqwest::Client {
        build_http_client(Duration::from_secs(5)).unwrap()
    }

    fn completion_body(content: Option<&str>) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1760788800u32,
            "model": "gemini-2.0-flash-001",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        })
    }

    #[tokio::test]
    async fn test_run_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_string_contains("gemini-2.0-flash-001"))
            .and(body_string_contains("say hi"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(Some("hi"))))
            .expect(1)
            .mount(&server)
            .await;

        let client = CompletionClient::new(
            &server.uri(),
            "test-key",
            "gemini-2.0-flash-001",
            http(),
        );
        assert_eq!(client.run_prompt("say hi").await.unwrap(), "hi");
    }

    #[tokio::test]
    async fn test_empty_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(None)))
            .mount(&server)
            .await;

        let client = CompletionClient::new(&server.uri(), "k", "m", http());
        assert!(matches!(
            client.run_prompt("x").await,
            Err(GenerationError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn test_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": {"message": "boom", "type": "server_error", "param": null, "code": null}
            })))
            .mount(&server)
            .await;

        let client = CompletionClient::new(&server.uri(), "k", "m", http());
        assert!(matches!(
            client.run_prompt("x").await,
            Err(GenerationError::Api(_))
        ));
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = Config::default();
        assert!(CompletionClient::from_config(&config, http()).is_err());
    }

    #[tokio::test]
    async fn test_stalled_service_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body(Some("late")))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let http = build_http_client(Duration::from_millis(300)).unwrap();
        let client = CompletionClient::new(&server.uri(), "k", "m", http);

        let started = std::time::Instant::now();
        let result = client.run_prompt("x").await;
        assert!(started.elapsed() < Duration::from_secs(3));
        assert!(matches!(result, Err(GenerationError::Api(_))));
    }
}
