mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod lexer;
mod parser;
mod printer;
mod reader;
mod stdlib;
mod value;

use clap::Parser;
use env::Environment;
use eval::eval_program;
use parser::{is_balanced, parse_program};
use printer::external_repr;
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

/// A tree-walking interpreter for a minimal Scheme dialect
#[derive(Parser, Debug)]
#[command(name = "minischeme")]
#[command(version = config::VERSION)]
#[command(about = "A tree-walking interpreter for a minimal Scheme dialect")]
struct CliArgs {
    /// Script file to execute (if omitted, starts the REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let env = Environment::new();
    builtins::register_builtins(&env);
    if let Err(e) = stdlib::load(&env) {
        tracing::error!(error = %e, "failed to load bundled standard library");
        eprintln!("{}", e.report());
        return ExitCode::FAILURE;
    }

    match args.script {
        Some(path) => run_script(&path, &env),
        None => {
            run_repl(&env);
            ExitCode::SUCCESS
        }
    }
}

/// Executes a script file and exits. A `tracing::debug!` per top-level form
/// gives visibility into batch runs without printing anything to stdout
/// (scripts only produce output via `display`/`newline`).
fn run_script(path: &PathBuf, env: &Rc<Environment>) -> ExitCode {
    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Cannot read script file {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let forms = match parse_program(&source) {
        Ok(forms) => forms,
        Err(e) => {
            eprintln!("{}", e.report());
            return ExitCode::FAILURE;
        }
    };

    for form in forms {
        tracing::debug!(form = %external_repr(&form), "evaluating top-level form");
        if let Err(e) = eval_program(vec![form], env) {
            eprintln!("{}", e.report());
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

/// Interactive REPL: reads one form at a time, buffering continuation lines
/// until parentheses balance, so a multi-line `(define ...)` doesn't need to
/// be typed on one line.
fn run_repl(env: &Rc<Environment>) {
    println!("{}", config::WELCOME_MESSAGE);
    println!("{}", config::WELCOME_SUBTITLE);

    let rl_config = Config::builder().auto_add_history(true).build();
    let mut rl = match DefaultEditor::with_config(rl_config) {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to initialize REPL: {e}");
            return;
        }
    };
    let _ = rl.load_history(config::HISTORY_FILE);

    let mut buffer = String::new();
    loop {
        let prompt = if buffer.is_empty() { config::PROMPT } else { "... " };
        match rl.readline(prompt) {
            Ok(line) => {
                if buffer.is_empty() {
                    match line.trim() {
                        "(quit)" | "(exit)" => break,
                        "(clear)" => {
                            print!("\x1B[2J\x1B[H");
                            continue;
                        }
                        "" => continue,
                        _ => {}
                    }
                }

                if !buffer.is_empty() {
                    buffer.push('\n');
                }
                buffer.push_str(&line);

                if !is_balanced(&buffer) {
                    continue;
                }

                let source = std::mem::take(&mut buffer);
                match parser::parse_one(&source) {
                    Ok(form) => match eval::eval(form, env) {
                        Ok(value) => {
                            if !value.is_unspecified() {
                                println!("{}", external_repr(&value));
                            }
                        }
                        Err(e) => eprintln!("{}", e.report()),
                    },
                    Err(e) => eprintln!("{}", e.report()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                buffer.clear();
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {e}");
                break;
            }
        }
    }

    let _ = rl.save_history(config::HISTORY_FILE);
}
