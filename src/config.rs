use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub project: ProjectConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CompletionConfig {
    /// OpenAI-compatible API base, e.g. `https://api.groq.com/openai/v1`.
    #[serde(default = "default_completion_base_url")]
    pub base_url: String,
    #[serde(default = "default_completion_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Environment variable holding the API key. Never stored in the file.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_completion_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: default_completion_base_url(),
            model: default_completion_model(),
            temperature: default_temperature(),
            api_key_env: default_api_key_env(),
            max_retries: default_max_retries(),
            timeout_secs: default_completion_timeout_secs(),
        }
    }
}

fn default_completion_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}
fn default_completion_model() -> String {
    "llama3-8b-8192".to_string()
}
fn default_temperature() -> f32 {
    0.3
}
fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}
fn default_completion_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingConfig {
    /// OpenAI-compatible API base for `POST /embeddings`.
    #[serde(default = "default_embedding_base_url")]
    pub base_url: String,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    #[serde(default = "default_embedding_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_embedding_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: default_embedding_base_url(),
            model: default_embedding_model(),
            api_key_env: default_embedding_api_key_env(),
            batch_size: default_batch_size(),
            max_retries: default_max_retries(),
            timeout_secs: default_embedding_timeout_secs(),
        }
    }
}

fn default_embedding_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}
fn default_embedding_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}
fn default_batch_size() -> usize {
    64
}
fn default_max_retries() -> u32 {
    5
}
fn default_embedding_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    /// Maximum characters per embedded segment.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Characters shared between consecutive segments.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

fn default_chunk_size() -> usize {
    1000
}
fn default_chunk_overlap() -> usize {
    200
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    /// Number of chunks pulled into the context window per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

fn default_top_k() -> usize {
    3
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProjectConfig {
    /// File extensions ingested from a project.
    #[serde(default = "default_extensions")]
    pub include_extensions: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            include_extensions: default_extensions(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
        }
    }
}

fn default_extensions() -> Vec<String> {
    ["py", "js", "ts", "java", "go", "rs", "md"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Load configuration from a TOML file, falling back to built-in defaults
/// when the file does not exist.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return validate(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(config)
}

fn validate(config: Config) -> Result<Config> {
    if config.chunking.chunk_size == 0 {
        anyhow::bail!("chunking.chunk_size must be > 0");
    }
    if config.chunking.chunk_overlap >= config.chunking.chunk_size {
        anyhow::bail!("chunking.chunk_overlap must be < chunking.chunk_size");
    }
    if config.retrieval.top_k < 1 {
        anyhow::bail!("retrieval.top_k must be >= 1");
    }
    if !(0.0..=1.0).contains(&config.completion.temperature) {
        anyhow::bail!("completion.temperature must be in [0.0, 1.0]");
    }
    if config.embedding.batch_size == 0 {
        anyhow::bail!("embedding.batch_size must be > 0");
    }
    Ok(config)
}
