//! Tokenizer for shell input.
//!
//! Uses Normal/Single/Double modes to resolve quoting while emitting a flat
//! token stream for the pipeline planner.
//!
//! Escape policy: outside single quotes a backslash makes the next character
//! literal and is dropped itself; a backslash with nothing after it is dropped
//! too. Inside single quotes a backslash is an ordinary character.
//!
//! Only an unquoted, unescaped space separates tokens. Tabs are ordinary
//! characters.
use crate::error::{ErrorKind, ShellError, ShellResult};

#[derive(Copy, Clone, Eq, PartialEq)]
enum ParseMode {
    Normal,
    Single,
    Double,
}

/// Tokenize rejecting unterminated quotes.
pub fn parse_line(input: &str) -> ShellResult<Vec<String>> {
    parse_line_with_mode(input, false)
}

/// Tokenize accepting unterminated quotes; whatever was accumulated is kept.
pub fn parse_line_lenient(input: &str) -> Vec<String> {
    // Lenient mode has no failure path.
    parse_line_with_mode(input, true).unwrap_or_default()
}

fn parse_line_with_mode(input: &str, lenient: bool) -> ShellResult<Vec<String>> {
    let mut args = Vec::new();
    let mut buf = String::new();
    let mut chars = input.chars().enumerate();
    let mut mode = ParseMode::Normal;
    // Offset of the quote that opened the current quoted run.
    let mut quote_start = 0usize;

    while let Some((pos, ch)) = chars.next() {
        match mode {
            ParseMode::Normal => match ch {
                ' ' => {
                    if !buf.is_empty() {
                        args.push(std::mem::take(&mut buf));
                    }
                }
                '\\' => {
                    if let Some((_, next)) = chars.next() {
                        buf.push(next);
                    }
                }
                '\'' => {
                    mode = ParseMode::Single;
                    quote_start = pos;
                }
                '"' => {
                    mode = ParseMode::Double;
                    quote_start = pos;
                }
                _ => buf.push(ch),
            },
            ParseMode::Single => {
                if ch == '\'' {
                    mode = ParseMode::Normal;
                } else {
                    buf.push(ch);
                }
            }
            ParseMode::Double => match ch {
                '"' => mode = ParseMode::Normal,
                '\\' => {
                    if let Some((_, next)) = chars.next() {
                        buf.push(next);
                    }
                }
                _ => buf.push(ch),
            },
        }
    }

    if mode != ParseMode::Normal && !lenient {
        let quote_char = if mode == ParseMode::Single { "'" } else { "\"" };
        return Err(ShellError::new(
            ErrorKind::Syntax,
            format!("unterminated {quote_char} quote"),
        )
        .with_context(format!("close the quote opened at column {}", quote_start + 1))
        .with_position(quote_start));
    }

    if !buf.is_empty() {
        args.push(buf);
    }

    Ok(args)
}
