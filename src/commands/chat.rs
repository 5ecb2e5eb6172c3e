//! Interactive chat session handler
//!
//! Runs the readline loop that stands in for the original page chrome: it
//! owns the session, forwards each utterance to the orchestrator, renders
//! the reply, and appends both turns. Starting a new chat discards the
//! session and rebuilds the orchestrator, which re-runs the startup probe.

use crate::backends::create_backend_with_override;
use crate::config::Config;
use crate::error::Result;
use crate::orchestrator::Orchestrator;
use crate::session::{Session, Turn};

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// In-chat command entered at the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    /// Clear the session and reconnect
    NewChat,
    /// Show backend state and session length
    Status,
    /// List available commands
    Help,
    /// Leave the chat
    Exit,
    /// Not a command; treat as an utterance
    None,
}

/// Parses a line of input as an in-chat command
///
/// # Examples
///
/// ```
/// use solace::commands::chat::{parse_chat_command, ChatCommand};
///
/// assert_eq!(parse_chat_command("/new"), ChatCommand::NewChat);
/// assert_eq!(parse_chat_command("I feel anxious"), ChatCommand::None);
/// ```
pub fn parse_chat_command(input: &str) -> ChatCommand {
    match input.trim() {
        "/new" => ChatCommand::NewChat,
        "/status" => ChatCommand::Status,
        "/help" => ChatCommand::Help,
        "/quit" | "/exit" => ChatCommand::Exit,
        _ => ChatCommand::None,
    }
}

/// Start an interactive chat session
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `backend_override` - Optional backend kind override from the CLI
/// * `model_override` - Optional model identifier override from the CLI
pub async fn run_chat(
    config: Config,
    backend_override: Option<String>,
    model_override: Option<String>,
) -> Result<()> {
    tracing::info!("Starting interactive chat session");

    let mut orchestrator = connect(
        &config,
        backend_override.as_deref(),
        model_override.as_deref(),
    )
    .await?;

    let mut session = Session::new();
    print_banner(&orchestrator, &session);

    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline("you >> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match parse_chat_command(trimmed) {
                    ChatCommand::NewChat => {
                        session = Session::new();
                        orchestrator = connect(
                            &config,
                            backend_override.as_deref(),
                            model_override.as_deref(),
                        )
                        .await?;
                        println!("{}\n", "Started a new chat.".green());
                        continue;
                    }
                    ChatCommand::Status => {
                        print_status(&orchestrator, &session);
                        continue;
                    }
                    ChatCommand::Help => {
                        print_help();
                        continue;
                    }
                    ChatCommand::Exit => break,
                    ChatCommand::None => {}
                }

                rl.add_history_entry(trimmed)?;

                let reply = orchestrator.respond(&session, trimmed).await;
                println!("{} {}\n", "solace >>".purple().bold(), reply);

                // The orchestrator is read-only over the session; the shell
                // owns both appends.
                session.push(Turn::user(trimmed));
                session.push(Turn::assistant(reply));
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    println!("{}", "Take care of yourself.".cyan());
    Ok(())
}

/// Builds an orchestrator and runs its startup probe, reporting the outcome
async fn connect(
    config: &Config,
    backend_override: Option<&str>,
    model_override: Option<&str>,
) -> Result<Orchestrator> {
    let backend =
        create_backend_with_override(&config.backend, backend_override, model_override)?;
    let mut orchestrator = Orchestrator::new(
        backend,
        config.orchestrator.clone(),
        config.backend.sampling.clone(),
    );

    println!("{}", "Connecting to the assistant...".cyan());
    if orchestrator.probe().await {
        println!("{}\n", "Connected.".green());
    } else {
        println!(
            "{}\n",
            "The backend could not be reached. Replies are unavailable until you start it and open a new chat with /new."
                .yellow()
        );
    }

    Ok(orchestrator)
}

/// Prints the welcome banner
fn print_banner(orchestrator: &Orchestrator, session: &Session) {
    println!("{}", "Solace".bold());
    println!("A safe space to talk about whatever is on your mind.");
    println!(
        "Backend: {}  |  Session started: {}",
        orchestrator.backend_name(),
        session.started_at().format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "{}",
        "Note: this is not a replacement for professional help. If you're in crisis, please contact a mental health professional."
            .dimmed()
    );
    println!("Type {} for commands.\n", "/help".cyan());
}

/// Prints backend state and session length
fn print_status(orchestrator: &Orchestrator, session: &Session) {
    println!(
        "Backend: {} ({})\nTurns this session: {}\n",
        orchestrator.backend_name(),
        orchestrator.state(),
        session.len()
    );
}

/// Prints the in-chat command list
fn print_help() {
    println!("Commands:");
    println!("  /new     start a new chat (clears history, reconnects)");
    println!("  /status  show backend state and session length");
    println!("  /help    show this help");
    println!("  /quit    leave the chat\n");
}
