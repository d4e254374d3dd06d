//! # codemate
//!
//! An AI coding assistant CLI: code review with per-chunk explanations,
//! project question answering, and change planning, built on a
//! chunk-and-retrieve core.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌─────────────┐
//! │  Sources     │──▶│  Pipeline     │──▶│ VectorIndex  │
//! │  fs / git    │   │ Split+Embed  │   │  (in-memory) │
//! └──────────────┘   └──────────────┘   └──────┬──────┘
//!                                              │ top-k
//!                   ┌──────────────┐   ┌───────▼──────┐
//!                   │  Completion  │◀──│   Prompt     │
//!                   │   provider   │   │  assembler   │
//!                   └──────────────┘   └──────────────┘
//! ```
//!
//! The index lives for one session only: it is rebuilt on every project
//! load and never persisted.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`chunker`] | Best-effort named code chunking |
//! | [`splitter`] | Size-bounded splitting before embedding |
//! | [`embedding`] | Embedding provider abstraction |
//! | [`index`] | In-memory cosine similarity index |
//! | [`retriever`] | Context window retrieval |
//! | [`prompt`] | Prompt assembly for qa / review / modify |
//! | [`completion`] | Chat completion client (plain + streaming) |
//! | [`source_fs`] | Local project scanning |
//! | [`source_git`] | Remote repository cloning |
//! | [`ingest`] | Project load pipeline |
//! | [`session`] | Per-project session state |
//! | [`review`] | Review command |
//! | [`chat`] | QA, chat, and modification commands |

pub mod chat;
pub mod chunker;
pub mod completion;
pub mod config;
pub mod embedding;
pub mod error;
pub mod index;
pub mod ingest;
pub mod models;
pub mod prompt;
pub mod retriever;
pub mod review;
pub mod session;
pub mod source_fs;
pub mod source_git;
pub mod splitter;
