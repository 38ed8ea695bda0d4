//! Error types and reporting for the shell.
//!
//! Every stage of line processing returns `ShellError` instead of bare strings:
//! - Error kind (syntax, resource exhaustion, spawn/exec failure, etc.)
//! - Human-readable message
//! - Optional hint about what the user can do about it
//! - Optional position of the offending input

use std::fmt;
use std::io;

/// Categorized error types, one per failure class of the line pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input: unterminated quote (strict profile) or empty pipeline segment
    Syntax,
    /// Descriptor or pipe creation failure
    Resource,
    /// The process-creation primitive failed
    Spawn,
    /// The requested program image could not be loaded
    Exec,
    /// Builtin invoked with missing or invalid arguments
    BuiltinUsage,
    /// Error loading/parsing configuration
    Config,
}

impl ErrorKind {
    fn label(self) -> Option<&'static str> {
        match self {
            ErrorKind::Syntax => Some("syntax error"),
            ErrorKind::Resource => Some("resource error"),
            ErrorKind::BuiltinUsage => Some("usage"),
            // Spawn and exec messages lead with the command name, config
            // messages with `config:<line>`.
            ErrorKind::Spawn | ErrorKind::Exec | ErrorKind::Config => None,
        }
    }
}

/// Rich error type with context information
#[derive(Debug, Clone)]
pub struct ShellError {
    pub kind: ErrorKind,
    pub message: String,
    /// Additional context explaining what was being processed
    pub context: Option<String>,
    /// Character offset for tokenizer errors, token index for pipeline errors
    pub position: Option<usize>,
    /// Underlying OS error class, when the failure came from a syscall
    pub io_kind: Option<io::ErrorKind>,
}

impl ShellError {
    /// Create a new error with just the kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        ShellError {
            kind,
            message: message.into(),
            context: None,
            position: None,
            io_kind: None,
        }
    }

    /// Add context string (e.g., "usage: cd <dir>")
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_position(mut self, pos: usize) -> Self {
        self.position = Some(pos);
        self
    }

    pub fn with_io_kind(mut self, kind: io::ErrorKind) -> Self {
        self.io_kind = Some(kind);
        self
    }

    /// Status recorded for a line that failed with this error.
    pub fn exit_status(&self) -> i32 {
        match self.kind {
            ErrorKind::Syntax | ErrorKind::BuiltinUsage | ErrorKind::Config => 2,
            ErrorKind::Resource | ErrorKind::Spawn => 1,
            ErrorKind::Exec => match self.io_kind {
                Some(io::ErrorKind::NotFound) => 127,
                _ => 126,
            },
        }
    }

    /// Format error with a snippet of the input showing where the problem is.
    ///
    /// Only meaningful for tokenizer errors, whose position is a character offset.
    pub fn display_with_input(&self, input: &str) -> String {
        let mut msg = self.display_simple();
        let Some(pos) = self.position else {
            return msg;
        };
        let chars: Vec<char> = input.chars().collect();
        if pos < chars.len() {
            let start = pos.saturating_sub(15);
            let end = (pos + 15).min(chars.len());
            let snippet: String = chars[start..end].iter().collect();
            msg.push_str(&format!("\n  near: '{snippet}'\n"));
            // Nine columns of `  near: '` precede the snippet.
            msg.push_str(&format!("{}^", " ".repeat(pos - start + 9)));
        } else {
            msg.push_str(&format!("\n  at position {pos} (end of input)"));
        }
        msg
    }

    /// Simplified display without input context
    pub fn display_simple(&self) -> String {
        let mut msg = match self.kind.label() {
            Some(label) => format!("{label}: {}", self.message),
            None => self.message.clone(),
        };
        if let Some(context) = &self.context {
            msg.push_str(&format!("\n  hint: {context}"));
        }
        msg
    }
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_simple())
    }
}

impl std::error::Error for ShellError {}

/// Convenience type alias for Results with ShellError
pub type ShellResult<T> = Result<T, ShellError>;
