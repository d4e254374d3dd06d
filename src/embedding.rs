//! Embedding provider boundary.
//!
//! The indexing pipeline treats embedding generation as an injected
//! capability: anything implementing [`Embedder`] can back the vector
//! index. The shipped implementation, [`HttpEmbedder`], calls an
//! OpenAI-compatible `POST /embeddings` endpoint with batching, retry, and
//! exponential backoff.
//!
//! # Retry strategy
//!
//! - HTTP 429 (rate limited) and 5xx (server error) → retry
//! - HTTP 4xx (client error, not 429) → fail immediately
//! - Network errors → retry
//! - Backoff: 1s, 2s, 4s, 8s, 16s, 32s (capped at 2^5)

use async_trait::async_trait;
use std::time::Duration;

use crate::config::EmbeddingConfig;
use crate::error::ProviderError;

/// Capability to turn text into fixed-dimensionality vectors.
///
/// Implementations must return one vector per input text, in input order,
/// all of the same dimensionality.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Model identifier (e.g. `"text-embedding-3-small"`).
    fn model_name(&self) -> &str;

    /// Embed a batch of texts.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError>;

    /// Embed a single query text.
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        let results = self.embed(&[text.to_string()]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Terminal("Empty embedding response".to_string()))
    }
}

/// Embedding provider backed by an OpenAI-compatible HTTP API.
pub struct HttpEmbedder {
    client: reqwest::Client,
    config: EmbeddingConfig,
    api_key: String,
}

impl HttpEmbedder {
    /// Create a provider from configuration.
    ///
    /// Fails if the configured API key environment variable is not set.
    pub fn new(config: &EmbeddingConfig) -> Result<Self, ProviderError> {
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

    fn endpoint(&self) -> String {
        format!("{}/embeddings", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        let body = serde_json::json!({
            "model": self.config.model,
            "input": texts,
        });

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
                .json(&body)
                .send()
                .await;

            match resp {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let json: serde_json::Value = response
                            .json()
                            .await
                            .map_err(|e| ProviderError::Terminal(e.to_string()))?;
                        return parse_embeddings_response(&json, texts.len());
                    }

                    let body_text = response.text().await.unwrap_or_default();
                    let msg = format!("Embedding API error {}: {}", status, body_text);

                    // Rate limited or server error — retry
                    if status.as_u16() == 429 || status.is_server_error() {
                        last_err = Some(ProviderError::Retryable(msg));
                        continue;
                    }

                    // Client error (not 429) — don't retry
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
            .unwrap_or_else(|| ProviderError::Retryable("Embedding failed after retries".into())))
    }
}

/// Parse the embeddings API response JSON, extracting `data[].embedding`
/// arrays in order. The response must carry exactly one vector per input;
/// a short batch would otherwise silently drop trailing segments at
/// index-build time.
fn parse_embeddings_response(
    json: &serde_json::Value,
    expected: usize,
) -> Result<Vec<Vec<f32>>, ProviderError> {
    let data = json
        .get("data")
        .and_then(|d| d.as_array())
        .ok_or_else(|| {
            ProviderError::Terminal("Invalid embedding response: missing data array".to_string())
        })?;

    if data.len() != expected {
        return Err(ProviderError::Terminal(format!(
            "Embedding API returned {} vectors for {} inputs",
            data.len(),
            expected
        )));
    }

    let mut embeddings = Vec::with_capacity(data.len());

    for item in data {
        let embedding = item
            .get("embedding")
            .and_then(|e| e.as_array())
            .ok_or_else(|| {
                ProviderError::Terminal("Invalid embedding response: missing embedding".to_string())
            })?;

        let vec: Vec<f32> = embedding
            .iter()
            .map(|v| v.as_f64().unwrap_or(0.0) as f32)
            .collect();

        embeddings.push(vec);
    }

    Ok(embeddings)
}

/// Compute cosine similarity between two embedding vectors.
///
/// Returns a value in `[-1.0, 1.0]`; `0.0` for empty vectors or vectors of
/// different lengths. The same metric is used for indexing and querying.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let v = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_opposite() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_empty_and_mismatched() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_parse_embeddings_response() {
        let json = serde_json::json!({
            "data": [
                { "embedding": [0.1, 0.2] },
                { "embedding": [0.3, 0.4] }
            ]
        });
        let vecs = parse_embeddings_response(&json, 2).unwrap();
        assert_eq!(vecs.len(), 2);
        assert_eq!(vecs[0].len(), 2);
        assert!((vecs[1][0] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_parse_embeddings_response_missing_data() {
        let json = serde_json::json!({ "error": "nope" });
        assert!(parse_embeddings_response(&json, 1).is_err());
    }

    #[test]
    fn test_parse_embeddings_response_rejects_short_batch() {
        // One vector back for two inputs must fail loudly, not truncate.
        let json = serde_json::json!({
            "data": [ { "embedding": [0.1, 0.2] } ]
        });
        let err = parse_embeddings_response(&json, 2).unwrap_err();
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("1 vectors for 2 inputs"));
    }
}
