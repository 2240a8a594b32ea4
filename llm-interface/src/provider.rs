use async_trait::async_trait;
use ideascout_core::{ConfigError, CoreError, LlmConfig, LlmError, LLM_API_KEY_ENV};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const PROVIDER_NAME: &str = "openai-compatible";
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Sends one prompt and returns the raw text of the first completion.
    async fn complete(&self, system: Option<&str>, prompt: &str) -> Result<String, CoreError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Any server speaking the OpenAI `chat/completions` protocol.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleProvider {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiCompatibleProvider {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/v1/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            model: model.into(),
            temperature: LlmConfig::default().temperature,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, CoreError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvironmentVariable {
                var_name: LLM_API_KEY_ENV.to_string(),
            })?;
        Ok(Self::new(
            &config.base_url,
            api_key,
            &config.model,
            Duration::from_secs(config.timeout_secs),
        )?
        .with_temperature(config.temperature))
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn complete(&self, system: Option<&str>, prompt: &str) -> Result<String, CoreError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });
        let body = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        };

        debug!("POST {} (model {})", self.endpoint, self.model);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CoreError::Llm(LlmError::RequestTimeout {
                        provider: PROVIDER_NAME.to_string(),
                    })
                } else {
                    CoreError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            let body = response.text().await.unwrap_or_default();
            return Err(CoreError::Llm(status_error(status, retry_after, &self.model, body)));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            CoreError::Llm(LlmError::InvalidResponseFormat {
                provider: PROVIDER_NAME.to_string(),
                details: e.to_string(),
            })
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                CoreError::Llm(LlmError::InvalidResponseFormat {
                    provider: PROVIDER_NAME.to_string(),
                    details: "response carried no completion text".to_string(),
                })
            })
    }
}

fn status_error(status: StatusCode, retry_after: u64, model: &str, body: String) -> LlmError {
    let provider = PROVIDER_NAME.to_string();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::InvalidApiKey { provider },
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded {
            provider,
            retry_after,
        },
        StatusCode::NOT_FOUND => LlmError::ModelNotAvailable {
            model: model.to_string(),
        },
        s if s.is_server_error() => LlmError::ServiceUnavailable { provider },
        s => LlmError::RequestFailed {
            provider,
            status_code: s.as_u16(),
            body,
        },
    }
}
