use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use crate::config::ConfigError;
use crate::config_env::{optional_trimmed_env, parse_u64_env, require_env};
use crate::conversation::{MAX_WINDOW_TURNS, Turn};

use super::gateway::{ChatGateway, ChatGatewayError, ChatGatewayFuture};
use super::prompts::SYSTEM_PROMPT;

const DEFAULT_CHAT_COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_MODEL: &str = "x-ai/grok-4.1-fast";
const DEFAULT_TIMEOUT_MS: u64 = 60_000;

// Optional OpenRouter attribution headers so the app shows up correctly in
// the provider dashboard.
const REFERER_HEADER_VALUE: &str = "https://example.com/parley";
const TITLE_HEADER_VALUE: &str = "Parley";

#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub chat_completions_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_ms: u64,
}

impl OpenRouterConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let chat_completions_url = optional_trimmed_env("OPENROUTER_CHAT_COMPLETIONS_URL")
            .unwrap_or_else(|| DEFAULT_CHAT_COMPLETIONS_URL.to_string());
        if !chat_completions_url.starts_with("http://")
            && !chat_completions_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidConfiguration(
                "OPENROUTER_CHAT_COMPLETIONS_URL must start with http:// or https://".to_string(),
            ));
        }

        Ok(Self {
            chat_completions_url,
            api_key: require_env("OPENROUTER_API_KEY")?,
            model: optional_trimmed_env("OPENROUTER_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout_ms: parse_u64_env("OPENROUTER_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?,
        })
    }
}

#[derive(Clone)]
pub struct OpenRouterGateway {
    client: reqwest::Client,
    config: OpenRouterConfig,
}

impl OpenRouterGateway {
    pub fn new(config: OpenRouterConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| {
                ConfigError::InvalidConfiguration(format!("failed to build http client: {err}"))
            })?;

        Ok(Self { client, config })
    }

    async fn send_once(&self, prompt: &str, history: &[Turn]) -> Result<String, ChatGatewayError> {
        let request_body = json!({
            "model": self.config.model,
            "messages": build_messages(prompt, history),
        });

        let response = self
            .client
            .post(&self.config.chat_completions_url)
            .bearer_auth(&self.config.api_key)
            .header("HTTP-Referer", REFERER_HEADER_VALUE)
            .header("X-Title", TITLE_HEADER_VALUE)
            .json(&request_body)
            .send()
            .await
            .map_err(|err| ChatGatewayError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ChatGatewayError::Transport(err.to_string()))?;

        if !status.is_success() {
            return Err(ChatGatewayError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = match serde_json::from_str::<ChatCompletionResponse>(&body) {
            Ok(parsed) => parsed,
            Err(_) => return Err(ChatGatewayError::InvalidPayload { body }),
        };

        let Some(choice) = parsed.choices.into_iter().next() else {
            return Err(ChatGatewayError::InvalidPayload { body });
        };

        Ok(choice.message.content.trim().to_string())
    }
}

impl ChatGateway for OpenRouterGateway {
    fn complete<'a>(&'a self, prompt: &'a str, history: &'a [Turn]) -> ChatGatewayFuture<'a> {
        Box::pin(async move { self.send_once(prompt, history).await })
    }
}

/// Assembles the outbound message list. One slot is reserved for the system
/// instruction: the history plus the new user turn are trimmed to the
/// remaining capacity, so a full window can never evict the instruction.
fn build_messages(prompt: &str, history: &[Turn]) -> Vec<Turn> {
    let tail_capacity = MAX_WINDOW_TURNS - 1;
    let mut tail = history.to_vec();
    tail.push(Turn::user(prompt));
    if tail.len() > tail_capacity {
        tail.drain(..tail.len() - tail_capacity);
    }

    let mut messages = Vec::with_capacity(tail.len() + 1);
    messages.push(Turn::system(SYSTEM_PROMPT));
    messages.extend(tail);
    messages
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    content: String,
}
