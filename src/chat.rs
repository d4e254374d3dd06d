//! Project chat and modification commands.
//!
//! Each turn follows the same shape: retrieve context for the user's
//! input, assemble the mode-specific prompt, and send it with the QA
//! system message. Responses can be streamed to stdout fragment by
//! fragment; the turn is complete only once the stream is exhausted.
//!
//! Conversation history accumulates on the session for its lifetime, but
//! each completion request carries only the system message and the current
//! assembled prompt.

use anyhow::Result;
use std::io::{BufRead, Write};

use crate::completion::CompletionClient;
use crate::config::Config;
use crate::embedding::Embedder;
use crate::models::ConversationTurn;
use crate::prompt::{assemble_modify, assemble_qa, QA_SYSTEM_PROMPT};
use crate::retriever::retrieve;
use crate::session::ProjectSession;

/// Answer a single question against the loaded project.
///
/// Returns the answer text, or an `Error ...` string if a provider call
/// failed. Never raises for provider failures.
pub async fn answer_question(
    client: &CompletionClient,
    embedder: &dyn Embedder,
    session: &ProjectSession,
    config: &Config,
    question: &str,
    stream: bool,
) -> String {
    let context = match retrieve(
        Some(&session.index),
        embedder,
        question,
        config.retrieval.top_k,
    )
    .await
    {
        Ok(context) => context,
        Err(e) => return emit_error(format!("Error retrieving context: {}", e), stream),
    };

    let messages = vec![
        ConversationTurn::system(QA_SYSTEM_PROMPT),
        ConversationTurn::user(assemble_qa(&context, question)),
    ];

    let result = if stream {
        client
            .complete_streaming(&messages, |fragment| {
                print!("{}", fragment);
                let _ = std::io::stdout().flush();
            })
            .await
    } else {
        client.complete(&messages).await
    };

    match result {
        Ok(answer) => answer,
        Err(e) => emit_error(format!("Error: {}", e), stream),
    }
}

/// In streaming mode the caller only closes the line afterwards, so error
/// strings must reach stdout here to be seen at all.
fn emit_error(message: String, stream: bool) -> String {
    if stream {
        print!("{}", message);
        let _ = std::io::stdout().flush();
    }
    message
}

/// Produce a modification plan for the loaded project.
pub async fn plan_modification(
    client: &CompletionClient,
    embedder: &dyn Embedder,
    session: &ProjectSession,
    config: &Config,
    request: &str,
) -> String {
    let context = match retrieve(
        Some(&session.index),
        embedder,
        request,
        config.retrieval.top_k,
    )
    .await
    {
        Ok(context) => context,
        Err(e) => return format!("Error retrieving context: {}", e),
    };

    let messages = vec![
        ConversationTurn::system(QA_SYSTEM_PROMPT),
        ConversationTurn::user(assemble_modify(&context, request)),
    ];

    match client.complete(&messages).await {
        Ok(plan) => plan,
        Err(e) => format!("Error: {}", e),
    }
}

/// One-shot QA command.
pub async fn run_ask(
    config: &Config,
    session: &mut ProjectSession,
    embedder: &dyn Embedder,
    question: &str,
    stream: bool,
) -> Result<()> {
    let client = CompletionClient::new(&config.completion)?;

    session.push_user(question);
    let answer = answer_question(&client, embedder, session, config, question, stream).await;
    if stream {
        // Fragments were already printed; close the line.
        println!();
    } else {
        println!("{}", answer);
    }
    session.push_assistant(answer);

    Ok(())
}

/// Interactive chat loop over stdin. `exit`, `quit`, or EOF ends the
/// session; history accumulates across turns until then.
pub async fn run_chat(
    config: &Config,
    session: &mut ProjectSession,
    embedder: &dyn Embedder,
) -> Result<()> {
    let client = CompletionClient::new(&config.completion)?;

    eprintln!(
        "Chatting about {} ({} files). Type 'exit' to quit.",
        session.root.display(),
        session.file_count
    );

    let stdin = std::io::stdin();
    loop {
        eprint!("> ");
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question == "exit" || question == "quit" {
            break;
        }

        session.push_user(question);
        let answer = answer_question(&client, embedder, session, config, question, true).await;
        println!();
        session.push_assistant(answer);
    }

    Ok(())
}

/// Modification-plan command.
pub async fn run_modify(
    config: &Config,
    session: &mut ProjectSession,
    embedder: &dyn Embedder,
    request: &str,
) -> Result<()> {
    let client = CompletionClient::new(&config.completion)?;

    session.push_user(request);
    let plan = plan_modification(&client, embedder, session, config, request).await;
    println!("{}", plan);
    session.push_assistant(format!("Modification suggestion:\n{}", plan));

    Ok(())
}
