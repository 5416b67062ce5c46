use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Errors that can occur when calling the completion API
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

/// Client for an OpenAI-compatible chat completion endpoint.
///
/// Retries transport errors, 429s and 5xx responses with exponential backoff;
/// other API errors surface immediately.
pub struct LlmClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
    max_retries: u32,
}

impl LlmClient {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        max_tokens: u32,
        temperature: f64,
        max_retries: u32,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            max_tokens,
            temperature,
            max_retries,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one chat completion and return the assistant's text.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
        });

        let mut attempt = 0u32;
        loop {
            attempt += 1;

            let result = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await;

            let retryable = match &result {
                Ok(response) => {
                    let status = response.status();
                    status.as_u16() == 429 || status.is_server_error()
                }
                Err(_) => true,
            };

            if retryable && attempt <= self.max_retries {
                let backoff = Duration::from_millis(500 * 2u64.pow(attempt - 1));
                tracing::warn!(
                    "Completion attempt {}/{} failed, retrying in {:?}",
                    attempt,
                    self.max_retries + 1,
                    backoff
                );
                tokio::time::sleep(backoff).await;
                continue;
            }

            let response = result?;
            let status = response.status();
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(LlmError::ApiError {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: CompletionResponse = response.json().await?;
            let content = parsed
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content)
                .ok_or_else(|| LlmError::InvalidResponse("empty choices array".to_string()))?;

            if content.trim().is_empty() {
                return Err(LlmError::InvalidResponse(
                    "completion content was empty".to_string(),
                ));
            }

            return Ok(content);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str, max_retries: u32) -> LlmClient {
        LlmClient::new(
            base_url.to_string(),
            "test-key".to_string(),
            "test-model".to_string(),
            256,
            0.7,
            max_retries,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_complete_returns_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"Hello there."}}]}"#,
            )
            .create_async()
            .await;

        let client = client(&server.url(), 0);
        let content = client.complete("system", "user").await.unwrap();
        assert_eq!(content, "Hello there.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_retries_server_errors() {
        let mut server = mockito::Server::new_async().await;
        // One retry configured: the endpoint should be hit exactly twice
        // before the error surfaces.
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(503)
            .with_body("overloaded")
            .expect(2)
            .create_async()
            .await;

        let client = client(&server.url(), 1);
        let err = client.complete("system", "user").await.unwrap_err();
        match err {
            LlmError::ApiError { status, .. } => assert_eq!(status, 503),
            other => panic!("unexpected error: {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_surfaces_client_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body("unauthorized")
            .create_async()
            .await;

        let client = client(&server.url(), 2);
        let err = client.complete("system", "user").await.unwrap_err();
        match err {
            LlmError::ApiError { status, .. } => assert_eq!(status, 401),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_invalid() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let client = client(&server.url(), 0);
        let err = client.complete("system", "user").await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(_)));
    }
}
