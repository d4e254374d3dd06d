//! In-memory vector index.
//!
//! Brute-force cosine similarity over all stored vectors. The index lives
//! for one project session only: it is built during project load and
//! dropped when the session ends or the project is reloaded. Nothing is
//! persisted across process restarts.

use crate::embedding::cosine_similarity;
use crate::models::{IndexedChunk, RetrievalHit};

/// Similarity-searchable collection of embedded text segments.
#[derive(Default)]
pub struct VectorIndex {
    entries: Vec<IndexedChunk>,
}

impl VectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a batch of texts with their embeddings and provenance.
    ///
    /// The three slices are parallel; entries beyond the shortest slice are
    /// ignored.
    pub fn add(&mut self, texts: &[String], embeddings: &[Vec<f32>], source_paths: &[String]) {
        for ((text, vector), path) in texts.iter().zip(embeddings.iter()).zip(source_paths.iter()) {
            self.entries.push(IndexedChunk {
                text: text.clone(),
                source_path: path.clone(),
                embedding: vector.clone(),
            });
        }
    }

    /// Number of indexed segments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the top-`k` entries by cosine similarity to `query_vec`,
    /// in non-increasing score order.
    pub fn search(&self, query_vec: &[f32], k: usize) -> Vec<RetrievalHit> {
        let mut hits: Vec<RetrievalHit> = self
            .entries
            .iter()
            .map(|entry| RetrievalHit {
                text: entry.text.clone(),
                source_path: entry.source_path.clone(),
                score: cosine_similarity(query_vec, &entry.embedding),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(k);
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with(vectors: &[(&str, &str, Vec<f32>)]) -> VectorIndex {
        let mut index = VectorIndex::new();
        let texts: Vec<String> = vectors.iter().map(|(t, _, _)| t.to_string()).collect();
        let paths: Vec<String> = vectors.iter().map(|(_, p, _)| p.to_string()).collect();
        let embeddings: Vec<Vec<f32>> = vectors.iter().map(|(_, _, v)| v.clone()).collect();
        index.add(&texts, &embeddings, &paths);
        index
    }

    #[test]
    fn test_empty_index_returns_no_hits() {
        let index = VectorIndex::new();
        assert!(index.search(&[1.0, 0.0], 3).is_empty());
    }

    #[test]
    fn test_search_orders_by_similarity_desc() {
        let index = index_with(&[
            ("far", "a.rs", vec![0.0, 1.0]),
            ("near", "b.rs", vec![1.0, 0.0]),
            ("mid", "c.rs", vec![0.7, 0.7]),
        ]);
        let hits = index.search(&[1.0, 0.0], 3);
        let order: Vec<&str> = hits.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(order, vec!["near", "mid", "far"]);
        for pair in hits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_search_returns_at_most_k() {
        let index = index_with(&[
            ("a", "a.rs", vec![1.0, 0.0]),
            ("b", "b.rs", vec![0.9, 0.1]),
            ("c", "c.rs", vec![0.8, 0.2]),
            ("d", "d.rs", vec![0.7, 0.3]),
        ]);
        assert_eq!(index.search(&[1.0, 0.0], 2).len(), 2);
        // k larger than the index returns everything
        assert_eq!(index.search(&[1.0, 0.0], 10).len(), 4);
    }

    #[test]
    fn test_provenance_preserved() {
        let index = index_with(&[("let x = 1;", "src/lib.rs", vec![1.0, 0.0])]);
        let hits = index.search(&[1.0, 0.0], 1);
        assert_eq!(hits[0].source_path, "src/lib.rs");
    }

    #[test]
    fn test_add_ignores_trailing_unmatched_entries() {
        let mut index = VectorIndex::new();
        index.add(
            &["a".to_string(), "b".to_string()],
            &[vec![1.0]],
            &["a.rs".to_string(), "b.rs".to_string()],
        );
        assert_eq!(index.len(), 1);
    }
}
