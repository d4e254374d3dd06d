//! Code review command.
//!
//! Sends a file to the completion provider for a five-section review and,
//! optionally, asks for a plain-language explanation of every chunk the
//! code chunker can name. Provider failures are rendered inline as
//! `Error ...` strings; the command itself never fails on a bad upstream.

use anyhow::{Context, Result};
use std::path::Path;

use crate::chunker::chunk_code;
use crate::completion::CompletionClient;
use crate::config::Config;
use crate::models::{CodeChunk, ConversationTurn};
use crate::prompt::{assemble_explain, assemble_review, validate_style};

/// Request a review of `code`, returning either the review text or an
/// `Error getting review: ...` string.
pub async fn get_review(
    client: &CompletionClient,
    code: &str,
    language: &str,
    style: &str,
) -> String {
    let prompt = assemble_review(code, language, style);
    match client.complete(&[ConversationTurn::user(prompt)]).await {
        Ok(review) => review,
        Err(e) => format!("Error getting review: {}", e),
    }
}

/// Request an explanation for every named chunk of `code`.
///
/// A failed explanation for one chunk does not stop the others; the error
/// string takes the explanation's place.
pub async fn get_explanations(
    client: &CompletionClient,
    code: &str,
    language: &str,
) -> Vec<(CodeChunk, String)> {
    let chunks = chunk_code(code, language);
    let mut explanations = Vec::with_capacity(chunks.len());

    for chunk in chunks {
        let prompt = assemble_explain(&chunk.text, language);
        let explanation = match client.complete(&[ConversationTurn::user(prompt)]).await {
            Ok(text) => text,
            Err(e) => format!("Error getting explanation: {}", e),
        };
        explanations.push((chunk, explanation));
    }

    explanations
}

/// CLI entry point: review a file, optionally with per-chunk explanations.
pub async fn run_review(
    config: &Config,
    file: &Path,
    language: &str,
    style: &str,
    explain: bool,
) -> Result<()> {
    validate_style(style)?;

    let code = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;

    let client = CompletionClient::new(&config.completion)?;

    eprintln!(
        "Reviewing {} ({} / {} style, model {})",
        file.display(),
        language,
        style,
        client.model()
    );

    let review = get_review(&client, &code, language, style).await;
    println!("--- Review ---");
    println!("{}", review);

    if explain {
        println!();
        println!("--- Explanations ---");
        let explanations = get_explanations(&client, &code, language).await;
        if explanations.is_empty() {
            println!("(no chunks recognized for explanation)");
        }
        for (chunk, explanation) in explanations {
            println!("[{}]", chunk.id);
            println!("{}", explanation);
            println!();
        }
    }

    Ok(())
}
