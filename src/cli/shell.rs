//! Interactive shell
//!
//! Reads commands line by line and runs each against the same session, so
//! charges added or reminders sent stay visible until the shell exits. Lines
//! use the command-line grammar without the leading `emdia`.

use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing::debug;

use super::{run_command, CliContext, Commands};
use crate::error::{EmDiaError, EmDiaResult};
use crate::session::Session;

#[derive(Parser, Debug)]
#[command(name = "emdia", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Commands,
}

/// What the loop does after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFlow {
    Continue,
    Exit,
}

/// Run the shell until `exit`, `quit` or end of input
pub fn run_shell<R: BufRead>(session: &mut Session, ctx: &CliContext, input: R) -> EmDiaResult<()> {
    println!("EmDia shell. Type 'help' for commands, 'exit' to leave.");

    let mut lines = input.lines();
    loop {
        print!("emdia> ");
        io::stdout()
            .flush()
            .map_err(|e| EmDiaError::Io(format!("Failed to write prompt: {}", e)))?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.map_err(|e| EmDiaError::Io(format!("Failed to read input: {}", e)))?;

        if execute_line(session, ctx, &line) == ShellFlow::Exit {
            break;
        }
    }

    Ok(())
}

/// Run a single shell line, printing any error instead of returning it
pub fn execute_line(session: &mut Session, ctx: &CliContext, line: &str) -> ShellFlow {
    let tokens = match tokenize(line) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ShellFlow::Continue;
        }
    };

    match tokens.first().map(String::as_str) {
        None => return ShellFlow::Continue,
        Some("exit") | Some("quit") => return ShellFlow::Exit,
        Some(_) => {}
    }

    debug!(?tokens, "Shell command");
    let parsed = match ShellLine::try_parse_from(&tokens) {
        Ok(parsed) => parsed,
        Err(e) => {
            // clap renders help and usage errors itself
            let _ = e.print();
            return ShellFlow::Continue;
        }
    };

    if let Commands::Shell = parsed.command {
        eprintln!("Error: already in a shell");
        return ShellFlow::Continue;
    }

    if let Err(e) = run_command(session, ctx, parsed.command) {
        eprintln!("Error: {}", e);
    }
    ShellFlow::Continue
}

/// Split a line into words
///
/// Double or single quotes group words, a backslash outside quotes escapes
/// the next character, and a line starting with `#` is a comment.
pub fn tokenize(line: &str) -> EmDiaResult<Vec<String>> {
    let line = line.trim();
    if line.starts_with('#') {
        return Ok(Vec::new());
    }

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    in_token = true;
                }
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                        in_token = true;
                    }
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }

    if let Some(q) = quote {
        return Err(EmDiaError::Validation(format!("Unterminated {} quote", q)));
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}
