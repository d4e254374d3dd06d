//! Context retrieval.
//!
//! Turns a user query into the context window for a completion prompt:
//! embed the query, pull the top-k most similar indexed segments, and
//! format them with their provenance. Callers without a loaded project get
//! the fixed [`NO_PROJECT_LOADED`] sentinel instead of an error.

use crate::embedding::Embedder;
use crate::error::ProviderError;
use crate::index::VectorIndex;
use crate::models::RetrievalHit;

/// Sentinel returned when retrieval is attempted before a project index
/// exists. Callers treat this as "no context", not as a failure.
pub const NO_PROJECT_LOADED: &str = "No project loaded";

/// Retrieve a formatted context string for `query`.
///
/// Returns [`NO_PROJECT_LOADED`] when no index has been built yet. Only
/// embedding the query can fail; with no index there is nothing to embed
/// and this never errors.
pub async fn retrieve(
    index: Option<&VectorIndex>,
    embedder: &dyn Embedder,
    query: &str,
    k: usize,
) -> Result<String, ProviderError> {
    let index = match index {
        Some(index) if !index.is_empty() => index,
        _ => return Ok(NO_PROJECT_LOADED.to_string()),
    };

    let query_vec = embedder.embed_query(query).await?;
    let hits = index.search(&query_vec, k);
    Ok(format_context(&hits))
}

/// Format retrieval hits into a single context string, each entry prefixed
/// with its source path, in the order given (descending similarity).
pub fn format_context(hits: &[RetrievalHit]) -> String {
    hits.iter()
        .map(|hit| format!("File: {}\nContent:\n{}", hit.source_path, hit.text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct PanicEmbedder;

    #[async_trait]
    impl Embedder for PanicEmbedder {
        fn model_name(&self) -> &str {
            "panic"
        }
        async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
            panic!("embedder must not be called without an index");
        }
    }

    #[tokio::test]
    async fn test_sentinel_without_index() {
        let result = retrieve(None, &PanicEmbedder, "anything", 3).await.unwrap();
        assert_eq!(result, NO_PROJECT_LOADED);
    }

    #[tokio::test]
    async fn test_sentinel_with_empty_index() {
        let index = VectorIndex::new();
        let result = retrieve(Some(&index), &PanicEmbedder, "anything", 3)
            .await
            .unwrap();
        assert_eq!(result, NO_PROJECT_LOADED);
    }

    #[test]
    fn test_format_context_prefixes_paths() {
        let hits = vec![
            RetrievalHit {
                text: "fn main() {}".to_string(),
                source_path: "src/main.rs".to_string(),
                score: 0.9,
            },
            RetrievalHit {
                text: "pub fn lib() {}".to_string(),
                source_path: "src/lib.rs".to_string(),
                score: 0.5,
            },
        ];
        let context = format_context(&hits);
        assert!(context.starts_with("File: src/main.rs\nContent:\nfn main() {}"));
        assert!(context.contains("File: src/lib.rs"));
        // Higher-scored entry comes first
        assert!(context.find("src/main.rs").unwrap() < context.find("src/lib.rs").unwrap());
    }

    #[test]
    fn test_format_context_empty() {
        assert_eq!(format_context(&[]), "");
    }
}
