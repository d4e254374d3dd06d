//! Prompt assembly.
//!
//! Pure string construction: each function combines retrieved context, user
//! intent, and fixed instructions into the final prompt sent to the
//! completion provider. No network or state side effects.

use anyhow::{bail, Result};

/// System message used for project QA and modification chats.
pub const QA_SYSTEM_PROMPT: &str =
    "You are an expert code explainer. Provide detailed technical answers based on the project context.";

/// Review styles accepted by [`assemble_review`].
pub const REVIEW_STYLES: [&str; 4] = ["professional", "friendly", "detailed", "concise"];

/// Validate a review style name.
pub fn validate_style(style: &str) -> Result<()> {
    if REVIEW_STYLES.contains(&style) {
        return Ok(());
    }
    bail!(
        "Unknown review style: {}. Use professional, friendly, detailed, or concise.",
        style
    )
}

/// QA prompt: project context plus the user's question, with instructions
/// to answer concisely and reference specific files.
pub fn assemble_qa(context: &str, question: &str) -> String {
    format!(
        "Project Context:\n\
         {context}\n\
         \n\
         User Question:\n\
         {question}\n\
         \n\
         Answer concisely and technically, always reference specific files when possible."
    )
}

/// Review prompt: the full code body, target language, and review style,
/// requesting the five fixed sections.
pub fn assemble_review(code: &str, language: &str, style: &str) -> String {
    format!(
        "You are an expert {language} code reviewer. Analyze the following code and provide a {style} review:\n\
         \n\
         Code:\n\
         {code}\n\
         \n\
         Review should cover:\n\
         1. Code quality and style\n\
         2. Potential bugs or issues\n\
         3. Performance considerations\n\
         4. Security concerns\n\
         5. Suggested improvements\n\
         \n\
         Format your response with clear headings for each section."
    )
}

/// Explanation prompt for a single code chunk.
pub fn assemble_explain(chunk: &str, language: &str) -> String {
    format!(
        "Explain this {language} code snippet in simple terms:\n\
         \n\
         {chunk}\n\
         \n\
         Your explanation should:\n\
         1. Describe what this code does\n\
         2. Explain key components\n\
         3. Be concise (1-2 paragraphs max)\n\
         4. Use simple language"
    )
}

/// Modification prompt: retrieved context plus a natural-language change
/// request, asking for affected files, exact changes, and new dependencies.
pub fn assemble_modify(context: &str, request: &str) -> String {
    format!(
        "Project Context:\n\
         {context}\n\
         \n\
         Modification Request:\n\
         {request}\n\
         \n\
         Provide:\n\
         1. Specific files that need changes\n\
         2. Exact code changes needed\n\
         3. Any dependencies to add"
    )
}
