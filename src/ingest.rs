//! Project ingestion pipeline.
//!
//! Coordinates the full load flow: source scan → size-bounded splitting →
//! embedding → index build. The index is rebuilt from scratch on every
//! load; any change to the project requires a full re-ingest.
//!
//! Undecodable files are skipped during the scan (non-fatal). Embedding
//! provider failures abort the load for the whole batch — there is no
//! partial-index-then-retry path.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;
use crate::embedding::Embedder;
use crate::index::VectorIndex;
use crate::session::ProjectSession;
use crate::source_fs;
use crate::source_git;
use crate::splitter::split_text;

/// Load a local project directory into a fresh session.
pub async fn load_project(
    root: &Path,
    config: &Config,
    embedder: &dyn Embedder,
) -> Result<ProjectSession> {
    let documents = source_fs::scan_project(root, &config.project)?;
    let file_count = documents.len();

    let mut texts: Vec<String> = Vec::new();
    let mut source_paths: Vec<String> = Vec::new();

    for doc in &documents {
        for segment in split_text(
            &doc.content,
            config.chunking.chunk_size,
            config.chunking.chunk_overlap,
        ) {
            texts.push(segment);
            source_paths.push(doc.path.clone());
        }
    }

    let index = build_index(&texts, &source_paths, config, embedder).await?;

    eprintln!(
        "Loaded {} files ({} segments indexed with {}) from {}",
        file_count,
        index.len(),
        embedder.model_name(),
        root.display()
    );

    Ok(ProjectSession::new(root.to_path_buf(), file_count, index))
}

/// Clone a remote repository and load it into a fresh session.
///
/// The temporary checkout is owned by the session and removed when the
/// session is dropped.
pub async fn load_repo(
    url: &str,
    config: &Config,
    embedder: &dyn Embedder,
) -> Result<ProjectSession> {
    eprintln!("Cloning {} ...", url);
    let checkout = source_git::clone_repo(url)?;
    let session = load_project(checkout.path(), config, embedder).await?;
    Ok(session.with_checkout(checkout))
}

/// Embed all segments in batches and build the vector index.
async fn build_index(
    texts: &[String],
    source_paths: &[String],
    config: &Config,
    embedder: &dyn Embedder,
) -> Result<VectorIndex> {
    let mut index = VectorIndex::new();

    for (text_batch, path_batch) in texts
        .chunks(config.embedding.batch_size)
        .zip(source_paths.chunks(config.embedding.batch_size))
    {
        let embeddings = embedder
            .embed(text_batch)
            .await
            .with_context(|| "Embedding failed while indexing project")?;
        index.add(text_batch, &embeddings, path_batch);
    }

    Ok(index)
}
