// ABOUTME: Version banner, REPL prompt, and recursion-depth constants

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const WELCOME_MESSAGE: &str = "minischeme";
pub const WELCOME_SUBTITLE: &str = "a tree-walking interpreter for a minimal Scheme dialect";

pub const PROMPT: &str = "scheme> ";
pub const HISTORY_FILE: &str = ".scheme_history";

pub const HELP_TEXT: &str = r#"
Available REPL commands:
  (quit) or (exit)     - Exit the REPL
  (clear)               - Clear the screen

Type any Scheme expression to evaluate it. Ctrl-D also exits.
"#;

/// Ceiling on nested `eval` calls. Rust cannot recover from a genuine native
/// stack overflow, so the interpreter tracks its own recursion depth and
/// raises `SchemeError::StackOverflow` before the host stack would ever be
/// exhausted -- what lets a self-recursive `(loop)` with no base case
/// terminate instead of aborting the process.
pub const MAX_EVAL_DEPTH: usize = 6_000;
