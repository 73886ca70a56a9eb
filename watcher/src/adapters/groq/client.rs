//! Groq chat completions client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::ports::AssessmentService;
use crate::error::{AssessmentError, ConfigError};

/// Assessment client for an OpenAI-compatible chat completions endpoint
pub struct GroqAssessmentClient {
    http: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl GroqAssessmentClient {
    pub fn new(
        endpoint: String,
        api_key: String,
        model: String,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            model,
            max_tokens,
        })
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<ChatCompletionResponse, AssessmentError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| AssessmentError::Deserialization(e.to_string()))
        } else if status.as_u16() == 401 {
            Err(AssessmentError::Unauthorized)
        } else if status.as_u16() == 429 {
            Err(AssessmentError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(AssessmentError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Moderator instruction sent with every post
pub fn build_prompt(content: &str, author: &str) -> String {
    format!(
        "You are a school forum moderator. A student named '{}' posted:\n\n\
         \"{}\"\n\n\
         In one sentence, describe whether this message contains cyberbullying, \
         harassment, or targeted meanness toward another person. \
         If it does not, say so plainly. Be concise and neutral.",
        author, content
    )
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl AssessmentService for GroqAssessmentClient {
    async fn assess(&self, content: &str, author: &str) -> Result<String, AssessmentError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![ChatMessage {
                role: "user",
                content: build_prompt(content, author),
            }],
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let completion = self.handle_response(response).await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(AssessmentError::EmptyResponse)
    }
}
