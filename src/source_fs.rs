//! Local filesystem project source.
//!
//! Walks a project directory and yields [`SourceDocument`]s for every file
//! matching the configured extension allowlist. Files that fail UTF-8
//! decoding are skipped silently; a binary blob in the tree never fails
//! the batch.

use anyhow::{bail, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use walkdir::WalkDir;

use crate::config::ProjectConfig;
use crate::models::SourceDocument;

/// Scan a project directory for source files.
///
/// Results are sorted by path for deterministic ordering.
pub fn scan_project(root: &Path, config: &ProjectConfig) -> Result<Vec<SourceDocument>> {
    if !root.exists() {
        bail!("Project path does not exist: {}", root.display());
    }

    let mut default_excludes = vec![
        "**/.git/**".to_string(),
        "**/target/**".to_string(),
        "**/node_modules/**".to_string(),
    ];
    default_excludes.extend(config.exclude_globs.clone());
    let exclude_set = build_globset(&default_excludes)?;

    let mut documents = Vec::new();

    let walker = WalkDir::new(root).follow_links(config.follow_symlinks);
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        if exclude_set.is_match(&rel_str) {
            continue;
        }

        if !has_allowed_extension(path, &config.include_extensions) {
            continue;
        }

        // Skip files that are not valid UTF-8 text.
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => continue,
        };

        documents.push(SourceDocument {
            path: rel_str,
            content,
        });
    }

    documents.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(documents)
}

/// Render an indented tree of the project's directories and files.
pub fn project_tree(root: &Path) -> Result<String> {
    if !root.exists() {
        bail!("Project path does not exist: {}", root.display());
    }

    let mut lines = Vec::new();

    // Prune noisy internals from the walk entirely.
    let walker = WalkDir::new(root).sort_by_file_name().into_iter();
    for entry in walker.filter_entry(|e| {
        !matches!(
            e.file_name().to_str(),
            Some(".git" | "target" | "node_modules")
        )
    }) {
        let entry = entry?;
        let depth = entry.depth();
        let name = entry.file_name().to_string_lossy();

        if entry.file_type().is_dir() {
            lines.push(format!("{}{}/", "    ".repeat(depth), name));
        } else {
            lines.push(format!("{}{}", "    ".repeat(depth), name));
        }
    }

    Ok(lines.join("\n"))
}

fn has_allowed_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| extensions.iter().any(|allowed| allowed == ext))
        .unwrap_or(false)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
