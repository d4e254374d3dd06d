//! Core data models used throughout codemate.
//!
//! These types represent the documents, chunks, and conversation turns that
//! flow through the ingestion, retrieval, and chat pipelines.

/// A source file read from a project, before chunking.
///
/// Immutable once read; discarded after its content has been split and
/// indexed.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Path relative to the project root.
    pub path: String,
    /// Full decoded file content.
    pub content: String,
}

/// An addressable unit of source text produced by the code chunker.
///
/// `id` is either a detected declaration header (e.g. `"def f():"`) or a
/// positional label (`"line_3"`). Uniqueness is only guaranteed within one
/// document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeChunk {
    pub id: String,
    pub text: String,
}

/// A text segment stored in the vector index, with its embedding and
/// provenance.
#[derive(Debug, Clone)]
pub struct IndexedChunk {
    pub text: String,
    pub source_path: String,
    pub embedding: Vec<f32>,
}

/// A single retrieval hit: chunk text, provenance, and similarity score.
#[derive(Debug, Clone)]
pub struct RetrievalHit {
    pub text: String,
    pub source_path: String,
    pub score: f32,
}

/// Speaker role in a chat conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Wire name used by OpenAI-compatible chat APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One turn of a chat session, accumulated append-only for the lifetime of
/// the session.
#[derive(Debug, Clone)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}
