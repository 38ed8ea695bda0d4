//! Line-to-process core of the `seash` shell.
//!
//! This crate exposes the tokenizer, pipeline planner, glob expansion,
//! builtins and launcher so fuzz targets and tests can link them without
//! pulling in the interactive deps the binary needs.

pub mod builtins;
pub mod config;
pub mod error;
pub mod execution;
pub mod expansion;
#[cfg(feature = "expansion")]
pub mod interpreter;
pub mod parse;

/// Prefix of every diagnostic the shell prints.
pub const SHELL_NAME: &str = "seash";

pub use builtins::{BuiltinIo, BuiltinTable, Flow};
pub use error::{ErrorKind, ShellError, ShellResult};
pub use execution::{launch, LaunchOutcome};
pub use parse::{CommandSegment, PipelinePlan};

#[cfg(feature = "expansion")]
pub use expansion::{expand_globs, expand_token};
#[cfg(feature = "expansion")]
pub use interpreter::Interpreter;

/// Tokenize a shell command line into raw tokens.
pub fn parse_tokens(input: &str, strict_quotes: bool) -> ShellResult<Vec<String>> {
    if strict_quotes {
        parse::parse_line(input)
    } else {
        Ok(parse::parse_line_lenient(input))
    }
}

/// Split a token stream into pipeline stages.
pub fn parse_pipeline(tokens: Vec<String>) -> ShellResult<PipelinePlan> {
    parse::split_pipeline(tokens)
}

/// Fuzz helper for parser-only targets.
pub fn fuzz_parse_bytes(data: &[u8]) {
    let input = String::from_utf8_lossy(data);
    let lenient = parse::parse_line_lenient(&input);
    if let Ok(strict) = parse::parse_line(&input) {
        assert_eq!(strict, lenient);
    }
    if let Ok(plan) = parse::split_pipeline(lenient) {
        assert!(plan.segments().iter().all(|segment| !segment.argv().is_empty()));
    }
}

/// Fuzz helper for parser+expansion targets.
#[cfg(feature = "expansion")]
pub fn fuzz_expand_bytes(data: &[u8]) {
    let input = String::from_utf8_lossy(data);
    let tokens = parse::parse_line_lenient(&input);
    let expanded = expansion::expand_globs(tokens);
    let _ = parse::split_pipeline(expanded);
}
