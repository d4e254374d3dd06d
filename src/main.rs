//! # codemate CLI
//!
//! Commands for AI-assisted code review, project question answering, and
//! change planning.
//!
//! ## Usage
//!
//! ```bash
//! codemate --config ./codemate.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `codemate review <file>` | Five-section code review, optionally with per-chunk explanations |
//! | `codemate ask "<question>"` | Answer a question about a loaded project |
//! | `codemate chat` | Interactive project chat over stdin |
//! | `codemate modify "<request>"` | Plan code changes across the project |
//! | `codemate structure` | Print the project's file tree |
//!
//! ## Examples
//!
//! ```bash
//! # Review a file with a concise style and hover-style explanations
//! codemate review src/parser.py --language python --style concise --explain
//!
//! # Ask about a local project, streaming the answer
//! codemate ask "How does authentication work?" --project ./myapp --stream
//!
//! # Ask about a remote repository
//! codemate ask "What does the scheduler do?" --repo https://github.com/org/repo
//!
//! # Plan a change
//! codemate modify "Add error handling to main.py" --project ./myapp
//! ```
//!
//! API keys are read from the environment (`GROQ_API_KEY` for completions,
//! `OPENAI_API_KEY` for embeddings, both overridable in the config file).

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use codemate::config::{self, Config};
use codemate::embedding::HttpEmbedder;
use codemate::session::ProjectSession;
use codemate::{chat, ingest, review, source_fs};

/// codemate — an AI coding assistant over a chunk-and-retrieve core.
#[derive(Parser)]
#[command(
    name = "codemate",
    about = "AI coding assistant: code review, project QA, and change planning",
    version,
    long_about = "codemate ingests a project (local directory or remote git repository), \
    splits and embeds its files into an in-memory similarity index, and grounds code review, \
    question answering, and modification planning on retrieved context."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Missing files fall back to built-in defaults, so the flag is only
    /// needed to override models, endpoints, or chunking parameters.
    #[arg(long, global = true, default_value = "./codemate.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Review a source file.
    ///
    /// Produces a review covering code quality, bugs, performance,
    /// security, and improvements. With `--explain`, also explains each
    /// recognized chunk of the file in plain language.
    Review {
        /// File to review.
        file: PathBuf,

        /// Programming language of the file (drives chunk recognition).
        #[arg(long, default_value = "python")]
        language: String,

        /// Review style: professional, friendly, detailed, or concise.
        #[arg(long, default_value = "professional")]
        style: String,

        /// Also produce per-chunk explanations.
        #[arg(long)]
        explain: bool,
    },

    /// Ask a one-shot question about a project.
    ///
    /// Loads the project, builds the similarity index, retrieves the most
    /// relevant segments, and answers grounded on them.
    Ask {
        /// The question to answer.
        question: String,

        /// Local project directory to load.
        #[arg(long)]
        project: Option<PathBuf>,

        /// Remote git repository URL to clone and load.
        #[arg(long)]
        repo: Option<String>,

        /// Stream the answer fragment by fragment.
        #[arg(long)]
        stream: bool,
    },

    /// Chat interactively about a project.
    ///
    /// Maintains conversation history for the lifetime of the session.
    /// Type `exit` or `quit` (or close stdin) to end.
    Chat {
        /// Local project directory to load.
        #[arg(long)]
        project: Option<PathBuf>,

        /// Remote git repository URL to clone and load.
        #[arg(long)]
        repo: Option<String>,
    },

    /// Plan modifications to a project.
    ///
    /// Asks the model to enumerate affected files, exact changes, and any
    /// new dependencies for a natural-language change request.
    Modify {
        /// The change request, e.g. "Add error handling to main.py".
        request: String,

        /// Local project directory to load.
        #[arg(long)]
        project: Option<PathBuf>,

        /// Remote git repository URL to clone and load.
        #[arg(long)]
        repo: Option<String>,
    },

    /// Print the project's file tree.
    Structure {
        /// Local project directory.
        #[arg(long)]
        project: PathBuf,
    },
}

/// Load a session from exactly one of `--project` / `--repo`.
async fn load_session(
    config: &Config,
    project: Option<PathBuf>,
    repo: Option<String>,
    embedder: &HttpEmbedder,
) -> Result<ProjectSession> {
    match (project, repo) {
        (Some(path), None) => ingest::load_project(&path, config, embedder).await,
        (None, Some(url)) => ingest::load_repo(&url, config, embedder).await,
        (Some(_), Some(_)) => bail!("Pass either --project or --repo, not both"),
        (None, None) => bail!("A project is required: pass --project <dir> or --repo <url>"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Review {
            file,
            language,
            style,
            explain,
        } => {
            review::run_review(&cfg, &file, &language, &style, explain).await?;
        }
        Commands::Ask {
            question,
            project,
            repo,
            stream,
        } => {
            let embedder = HttpEmbedder::new(&cfg.embedding)?;
            let mut session = load_session(&cfg, project, repo, &embedder).await?;
            chat::run_ask(&cfg, &mut session, &embedder, &question, stream).await?;
        }
        Commands::Chat { project, repo } => {
            let embedder = HttpEmbedder::new(&cfg.embedding)?;
            let mut session = load_session(&cfg, project, repo, &embedder).await?;
            chat::run_chat(&cfg, &mut session, &embedder).await?;
        }
        Commands::Modify {
            request,
            project,
            repo,
        } => {
            let embedder = HttpEmbedder::new(&cfg.embedding)?;
            let mut session = load_session(&cfg, project, repo, &embedder).await?;
            chat::run_modify(&cfg, &mut session, &embedder, &request).await?;
        }
        Commands::Structure { project } => {
            println!("{}", source_fs::project_tree(&project)?);
        }
    }

    Ok(())
}
