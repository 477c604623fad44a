//! REPL session management
//!
//! The interactive host surface: every engine operation is exposed as a
//! named command with string parameters. State lives for the session only.

use std::fs;

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::engine::BoatGpt;

/// Interactive REPL session over one engine
pub struct ReplSession {
    engine: BoatGpt,
}

enum CommandResult {
    Continue,
    Quit,
}

impl ReplSession {
    /// Create a new REPL session
    pub fn new(engine: BoatGpt) -> Self {
        Self { engine }
    }

    /// Run the REPL main loop
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    match self.handle_command(input).await {
                        CommandResult::Continue => continue,
                        CommandResult::Quit => break,
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show new prompt
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D - exit
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "BoatGPT Interactive Session".bright_cyan().bold());
        println!(
            "Type {} for commands, {} to quit",
            "help".yellow(),
            "quit".yellow()
        );
        println!();
    }

    /// Dispatch one command line
    async fn handle_command(&mut self, input: &str) -> CommandResult {
        debug!(%input, "handle_command: called");
        let (cmd, rest) = match input.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim_start()),
            None => (input, ""),
        };

        match cmd {
            "help" | "h" => self.print_help(),
            "quit" | "q" | "exit" => return CommandResult::Quit,

            "create" => self.engine.create_instance(rest).await,
            "list" => {
                for id in self.engine.list_instances().await {
                    println!("{}", id);
                }
            }
            "delete" => self.engine.delete_instance(rest).await,
            "delete-all" => self.engine.delete_all_instances().await,

            "role" => {
                let (id, role) = split_arg(rest);
                self.engine.set_role(id, role).await;
            }
            "get-role" => println!("{}", self.engine.get_role(rest).await),

            "ask" => {
                let (id, text) = split_arg(rest);
                self.engine.ask(id, text).await;
                println!("{}", self.engine.latest_response(id).await);
            }
            "quick" => {
                let (id, text) = split_arg(rest);
                println!("{}", self.engine.quick_ask(id, text).await);
            }
            "latest" => println!("{}", self.engine.latest_response(rest).await),
            "clear-memory" => self.engine.clear_memory(rest).await,

            "analyze" => {
                let (key, image) = split_arg(rest);
                match resolve_image(image) {
                    Ok(image) => {
                        self.engine.analyze_image(&image, key).await;
                        println!("{}", self.engine.get_data(key).await);
                    }
                    Err(e) => eprintln!("{} {}", "error:".red(), e),
                }
            }
            "ask-data" => {
                let (id, key) = split_arg(rest);
                println!("{}", self.engine.ask_about_data(id, key).await);
            }
            "data" => println!("{}", self.engine.get_data(rest).await),
            "clear-data" => self.engine.clear_data(rest).await,

            other => {
                eprintln!("{} unknown command: {}", "error:".red(), other);
            }
        }

        CommandResult::Continue
    }

    fn print_help(&self) {
        println!("{}", "Instances".bright_cyan());
        println!("  {}              create an instance", "create <id>".yellow());
        println!("  {}                      list instance ids", "list".yellow());
        println!("  {}              delete an instance", "delete <id>".yellow());
        println!("  {}                delete everything but the default", "delete-all".yellow());
        println!("  {}        set an instance's persona", "role <id> <text>".yellow());
        println!("  {}            show an instance's persona", "get-role <id>".yellow());
        println!();
        println!("{}", "Chat".bright_cyan());
        println!("  {}         ask with memory", "ask <id> <text>".yellow());
        println!("  {}       ask without memory", "quick <id> <text>".yellow());
        println!("  {}              show the cached latest reply", "latest <id>".yellow());
        println!("  {}        forget an instance's transcript", "clear-memory <id>".yellow());
        println!();
        println!("{}", "Data".bright_cyan());
        println!(
            "  {}   describe an image (@path reads a file)",
            "analyze <key> <image>".yellow()
        );
        println!("  {}       ask about a stored entry", "ask-data <id> <key>".yellow());
        println!("  {}                show a stored entry", "data <key>".yellow());
        println!("  {}          remove a stored entry", "clear-data <key>".yellow());
        println!();
        println!("  {} / {}", "help".yellow(), "quit".yellow());
    }
}

/// Split "<first-word> <rest>" into its two parts
fn split_arg(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim_start()),
        None => (input, ""),
    }
}

/// The image argument verbatim, or the contents of a file when prefixed `@`
fn resolve_image(arg: &str) -> Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|e| eyre::eyre!("could not read {}: {}", path, e))?;
            Ok(content.trim().to_string())
        }
        None => Ok(arg.to_string()),
    }
}
