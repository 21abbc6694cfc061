//! # Completion Module
//!
//! Talks to an OpenAI-compatible chat-completions endpoint and turns its output
//! into song lists.
//!
//! - [`CompletionClient`] - one system + user message pair in, trimmed text out
//! - [`prompts`] - the fixed system instructions and user prompt templates
//! - [`parser`] - reads the model's JSON reply into [`crate::types::SongReference`]s
//!
//! The client never retries. A failed completion aborts the pipeline that
//! asked for it.

pub mod parser;
pub mod prompts;

use reqwest::Client;

use crate::{
    config::CompletionSettings,
    error::{Error, Result},
    types::{ChatMessage, ChatRequest, ChatResponse},
};

/// Client for a single chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl CompletionClient {
    pub fn new(http: Client, settings: &CompletionSettings) -> Self {
        Self {
            http,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one system instruction and one user prompt, returns the reply text.
    ///
    /// The first choice's content is returned with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// [`Error::UpstreamModel`] when the request fails, the endpoint answers with
    /// a non-2xx status, the body cannot be decoded, or it carries no choice with
    /// content.
    pub async fn complete(&self, system_instruction: &str, user_prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_instruction.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::UpstreamModel(e.to_string()))?;

        let body = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| Error::UpstreamModel(format!("unreadable response: {e}")))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| Error::UpstreamModel("completion returned no choices".to_string()))
    }
}
