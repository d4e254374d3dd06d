//! Best-effort code chunker.
//!
//! Splits a source text into named, addressable chunks for per-chunk
//! explanations. For Python, chunks are cut at top-level `def`/`class`
//! declaration headers; for every other language the text falls back to a
//! line-oriented split where each non-blank line becomes its own chunk.
//!
//! This is a regex heuristic, not a parser. Known limitations, kept as
//! observed behavior rather than silently corrected:
//!
//! - Only `def name(...):` and `class Name:` headers are recognized;
//!   decorators, multi-line signatures, and nested declarations are not
//!   split out.
//! - Text before the first recognized header is dropped.
//! - A Python document with no recognized headers yields zero chunks.
//! - Chunk ids are unique within one document only.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::CodeChunk;

/// Matches a Python declaration header at any position.
fn declaration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"def \w+\(.*?\):|class \w+:").unwrap())
}

/// Split `text` into named chunks for the given language.
///
/// Pure function of its inputs; returns chunks in document order. Empty
/// input yields no chunks.
pub fn chunk_code(text: &str, language: &str) -> Vec<CodeChunk> {
    if language.eq_ignore_ascii_case("python") {
        chunk_python(text)
    } else {
        chunk_lines(text)
    }
}

/// Cut at declaration headers; each chunk runs from its header to the next
/// header (or end of text) and is keyed by the trimmed header.
fn chunk_python(text: &str) -> Vec<CodeChunk> {
    let starts: Vec<(usize, usize)> = declaration_regex()
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    let mut chunks = Vec::with_capacity(starts.len());
    for (i, &(start, header_end)) in starts.iter().enumerate() {
        let end = starts.get(i + 1).map(|&(s, _)| s).unwrap_or(text.len());
        chunks.push(CodeChunk {
            id: text[start..header_end].trim().to_string(),
            text: text[start..end].to_string(),
        });
    }
    chunks
}

/// Fallback: every non-blank line is a chunk keyed `line_<n>` (1-based over
/// all lines, blank ones included in the numbering).
fn chunk_lines(text: &str) -> Vec<CodeChunk> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| CodeChunk {
            id: format!("line_{}", i + 1),
            text: line.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_two_functions() {
        let code = "def f():\n    return 1\n\ndef g():\n    return 2";
        let chunks = chunk_code(code, "python");
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].id, "def f():");
        assert_eq!(chunks[1].id, "def g():");
        assert!(chunks[0].text.contains("return 1"));
        assert!(!chunks[0].text.contains("return 2"));
        assert!(chunks[1].text.contains("return 2"));
    }

    #[test]
    fn test_python_class_header() {
        let code = "class Foo:\n    x = 1\n\ndef bar():\n    pass\n";
        let chunks = chunk_code(code, "python");
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].id, "class Foo:");
        assert_eq!(chunks[1].id, "def bar():");
    }

    #[test]
    fn test_python_chunks_cover_from_first_header() {
        // Concatenating chunk texts reconstructs the document from the
        // first header onward.
        let code = "import os\n\ndef f():\n    return 1\n\ndef g():\n    return 2\n";
        let chunks = chunk_code(code, "python");
        let joined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        let first_def = code.find("def f").unwrap();
        assert_eq!(joined, &code[first_def..]);
    }

    #[test]
    fn test_python_no_declarations_yields_zero_chunks() {
        // Observed original behavior: no headers means no chunks, not one
        // whole-document chunk.
        let chunks = chunk_code("x = 1\ny = 2\n", "python");
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_fallback_three_lines() {
        let chunks = chunk_code("let a = 1;\nlet b = 2;\nlet c = 3;", "go");
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].id, "line_1");
        assert_eq!(chunks[1].id, "line_2");
        assert_eq!(chunks[2].id, "line_3");
        assert_eq!(chunks[1].text, "let b = 2;");
    }

    #[test]
    fn test_fallback_skips_blank_lines_but_keeps_numbering() {
        let chunks = chunk_code("a\n\nb", "javascript");
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].id, "line_1");
        assert_eq!(chunks[1].id, "line_3");
    }

    #[test]
    fn test_fallback_chunk_count_equals_non_blank_lines() {
        let text = "one\ntwo\n\n  \nthree\nfour\n";
        let non_blank = text.lines().filter(|l| !l.trim().is_empty()).count();
        let chunks = chunk_code(text, "java");
        assert_eq!(chunks.len(), non_blank);
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        assert!(chunk_code("", "python").is_empty());
        assert!(chunk_code("", "go").is_empty());
    }

    #[test]
    fn test_language_case_insensitive() {
        let code = "def f():\n    pass";
        assert_eq!(chunk_code(code, "Python")[0].id, "def f():");
    }
}
