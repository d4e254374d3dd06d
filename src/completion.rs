//! Completion provider client.
//!
//! Stateless wrapper around an OpenAI-compatible `POST /chat/completions`
//! endpoint. Supports a single completed response or streaming delivery of
//! incremental fragments (SSE `data:` lines carrying `choices[0].delta`).
//!
//! Streaming contract: fragments are handed to the caller's sink in arrival
//! order and concatenated into the returned string once the stream is
//! exhausted (`data: [DONE]` or connection close). Dropping the response
//! mid-stream is the only cancellation mechanism.
//!
//! Non-streaming requests retry transient failures (HTTP 429/5xx, network
//! errors) with exponential backoff, mirroring the embedding client.
//! Streaming requests retry only until the response headers arrive; a
//! stream that dies mid-flight is surfaced as an error, not replayed.

use futures::StreamExt;
use std::time::Duration;

use crate::config::CompletionConfig;
use crate::error::ProviderError;
use crate::models::ConversationTurn;

/// One parsed server-sent event from a streaming completion.
#[derive(Debug, PartialEq)]
enum StreamEvent {
    /// An incremental content fragment.
    Delta(String),
    /// End-of-stream marker (`data: [DONE]`).
    Done,
}

/// Client for an OpenAI-compatible chat completion API.
pub struct CompletionClient {
    client: reqwest::Client,
    config: CompletionConfig,
    api_key: String,
}

impl CompletionClient {
    /// Create a client from configuration.
    ///
    /// Fails if the configured API key environment variable is not set.
    pub fn new(config: &CompletionConfig) -> Result<Self, ProviderError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            ProviderError::Terminal(format!(
                "{} environment variable not set",
                config.api_key_env
            ))
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Terminal(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn request_body(&self, messages: &[ConversationTurn], stream: bool) -> serde_json::Value {
        let wire_messages: Vec<serde_json::Value> = messages
            .iter()
            .map(|turn| {
                serde_json::json!({
                    "role": turn.role.as_str(),
                    "content": turn.content,
                })
            })
            .collect();

        serde_json::json!({
            "model": self.config.model,
            "messages": wire_messages,
            "temperature": self.config.temperature,
            "stream": stream,
        })
    }

    async fn send(
        &self,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, ProviderError> {
        let mut last_err = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = Duration::from_secs(1 << (attempt - 1).min(5));
                tokio::time::sleep(delay).await;
            }

            let resp = self
                .client
                .post(self.endpoint())
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Content-Type", "application/json")
                .json(body)
                .send()
                .await;

            match resp {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return Ok(response);
                    }

                    let body_text = response.text().await.unwrap_or_default();
                    let msg = format!("Completion API error {}: {}", status, body_text);

                    if status.as_u16() == 429 || status.is_server_error() {
                        last_err = Some(ProviderError::Retryable(msg));
                        continue;
                    }

                    return Err(ProviderError::Terminal(msg));
                }
                Err(e) => {
                    let err = ProviderError::from(e);
                    if !err.is_retryable() {
                        return Err(err);
                    }
                    last_err = Some(err);
                    continue;
                }
            }
        }

        Err(last_err
            .unwrap_or_else(|| ProviderError::Retryable("Completion failed after retries".into())))
    }

    /// Request a completion and return the full content string.
    pub async fn complete(&self, messages: &[ConversationTurn]) -> Result<String, ProviderError> {
        let body = self.request_body(messages, false);
        let response = self.send(&body).await?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Terminal(e.to_string()))?;

        parse_completion_response(&json)
    }

    /// Request a streaming completion.
    ///
    /// Each content fragment is passed to `on_fragment` as it arrives; the
    /// concatenation of all fragments is returned once the stream ends.
    pub async fn complete_streaming(
        &self,
        messages: &[ConversationTurn],
        mut on_fragment: impl FnMut(&str),
    ) -> Result<String, ProviderError> {
        let body = self.request_body(messages, true);
        let response = self.send(&body).await?;

        let mut stream = response.bytes_stream();
        let mut buffer: Vec<u8> = Vec::new();
        let mut full = String::new();

        'outer: while let Some(chunk) = stream.next().await {
            let chunk =
                chunk.map_err(|e| ProviderError::Retryable(format!("stream error: {}", e)))?;
            buffer.extend_from_slice(&chunk);

            // SSE frames are newline-delimited; parse every complete line.
            while let Some(newline_pos) = buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=newline_pos).collect();
                let line_str = String::from_utf8_lossy(&line);

                match parse_stream_line(line_str.trim_end()) {
                    Some(StreamEvent::Delta(fragment)) => {
                        on_fragment(&fragment);
                        full.push_str(&fragment);
                    }
                    Some(StreamEvent::Done) => break 'outer,
                    None => {}
                }
            }
        }

        Ok(full)
    }
}

/// Extract `choices[0].message.content` from a non-streaming response.
fn parse_completion_response(json: &serde_json::Value) -> Result<String, ProviderError> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            ProviderError::Terminal("Invalid completion response: missing content".to_string())
        })
}

/// Parse one SSE line into a stream event. Blank lines, comments, and
/// fragments without content (role preludes, finish markers) yield `None`.
fn parse_stream_line(line: &str) -> Option<StreamEvent> {
    let data = line.strip_prefix("data:")?.trim_start();

    if data == "[DONE]" {
        return Some(StreamEvent::Done);
    }

    let json: serde_json::Value = serde_json::from_str(data).ok()?;
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("delta"))
        .and_then(|d| d.get("content"))
        .and_then(|c| c.as_str())
        .map(|s| StreamEvent::Delta(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_completion_response() {
        let json = serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "hello" } }
            ]
        });
        assert_eq!(parse_completion_response(&json).unwrap(), "hello");
    }

    #[test]
    fn test_parse_completion_response_missing_content() {
        let json = serde_json::json!({ "choices": [] });
        assert!(parse_completion_response(&json).is_err());
    }

    #[test]
    fn test_parse_stream_delta() {
        let line = r#"data: {"choices":[{"delta":{"content":"Hi"}}]}"#;
        assert_eq!(
            parse_stream_line(line),
            Some(StreamEvent::Delta("Hi".to_string()))
        );
    }

    #[test]
    fn test_parse_stream_done() {
        assert_eq!(parse_stream_line("data: [DONE]"), Some(StreamEvent::Done));
    }

    #[test]
    fn test_parse_stream_ignores_non_data_lines() {
        assert_eq!(parse_stream_line(""), None);
        assert_eq!(parse_stream_line(": keep-alive"), None);
        assert_eq!(parse_stream_line("event: ping"), None);
    }

    #[test]
    fn test_parse_stream_ignores_role_prelude() {
        // First frame often carries only the role, no content.
        let line = r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#;
        assert_eq!(parse_stream_line(line), None);
    }

    #[test]
    fn test_fragments_concatenate_in_order() {
        let lines = [
            r#"data: {"choices":[{"delta":{"content":"Hel"}}]}"#,
            r#"data: {"choices":[{"delta":{"content":"lo, "}}]}"#,
            r#"data: {"choices":[{"delta":{"content":"world"}}]}"#,
            "data: [DONE]",
        ];
        let mut full = String::new();
        for line in lines {
            match parse_stream_line(line) {
                Some(StreamEvent::Delta(fragment)) => full.push_str(&fragment),
                Some(StreamEvent::Done) => break,
                None => {}
            }
        }
        assert_eq!(full, "Hello, world");
    }
}
