//! Startup configuration from `~/.seashrc`.
//!
//! Recognized lines:
//! - `prompt=<template>` with `{cwd}`, `{status}` and `{status?}` placeholders
//! - `strict_quotes=<bool>`
//! - `export NAME=value` or `NAME=value`, exported to launched programs
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{ErrorKind, ShellError};
use crate::SHELL_NAME;

pub const DEFAULT_PROMPT: &str = "seash ~> ";
pub const RC_FILE_NAME: &str = ".seashrc";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellConfig {
    pub prompt_template: Option<String>,
    pub strict_quotes: bool,
}

pub fn rc_path() -> Option<PathBuf> {
    let home = env::var_os("HOME")?;
    Some(Path::new(&home).join(RC_FILE_NAME))
}

/// Load `~/.seashrc` into `config`. A missing file is not an error; bad lines
/// are reported and skipped.
pub fn load_config(config: &mut ShellConfig) -> io::Result<()> {
    let Some(path) = rc_path() else {
        return Ok(());
    };
    load_config_from(&path, config)
}

pub fn load_config_from(path: &Path, config: &mut ShellConfig) -> io::Result<()> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };
    debug!("config event=load path={}", path.display());
    for err in apply_config_text(&content, config) {
        eprintln!("{SHELL_NAME}: {err}");
    }
    Ok(())
}

/// Apply every directive in `content`, returning one error per rejected line.
pub fn apply_config_text(content: &str, config: &mut ShellConfig) -> Vec<ShellError> {
    let mut errors = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Err(err) = apply_line(line, config) {
            errors.push(
                ShellError::new(ErrorKind::Config, format!("config:{line_no}: {}", err.message))
                    .with_position(line_no),
            );
        }
    }
    errors
}

fn apply_line(line: &str, config: &mut ShellConfig) -> Result<(), ShellError> {
    if let Some(rest) = line.strip_prefix("export ") {
        return parse_assignment(rest);
    }
    let Some((key, value)) = line.split_once('=') else {
        return Err(ShellError::new(ErrorKind::Config, "unrecognized directive"));
    };
    let key = key.trim();
    let value = strip_quotes(value.trim());
    match key {
        "prompt" | "PROMPT" => {
            config.prompt_template = Some(value.to_string());
            Ok(())
        }
        "strict_quotes" => {
            config.strict_quotes = parse_bool(value)?;
            Ok(())
        }
        _ => parse_assignment(line),
    }
}

pub fn parse_bool(value: &str) -> Result<bool, ShellError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Ok(true),
        "0" | "no" | "false" | "off" => Ok(false),
        _ => Err(
            ShellError::new(ErrorKind::Config, format!("invalid boolean: {value}"))
                .with_context("Valid values: 1/yes/true/on, 0/no/false/off"),
        ),
    }
}

fn parse_assignment(input: &str) -> Result<(), ShellError> {
    let (name, value) = input
        .trim()
        .split_once('=')
        .ok_or_else(|| ShellError::new(ErrorKind::Config, "assignment missing '='"))?;
    let name = name.trim();
    if !is_valid_var_name(name) {
        return Err(ShellError::new(
            ErrorKind::Config,
            format!("invalid variable name '{name}'"),
        ));
    }
    let value = strip_quotes(value.trim());
    debug!("config event=export name={}", name);
    env::set_var(name, value);
    Ok(())
}

fn is_valid_var_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(ch) if ch == '_' || ch.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|ch| ch == '_' || ch.is_ascii_alphanumeric())
}

fn strip_quotes(input: &str) -> &str {
    let bytes = input.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &input[1..bytes.len() - 1];
        }
    }
    input
}

pub fn build_prompt(
    interactive: bool,
    prompt_template: &Option<String>,
    last_status: i32,
    cwd: &Path,
) -> String {
    if !interactive {
        return String::new();
    }
    let Some(template) = prompt_template else {
        return DEFAULT_PROMPT.to_string();
    };
    let status_str = last_status.to_string();
    let status_opt = if last_status == 0 { "" } else { &status_str };
    template
        .replace("{status?}", status_opt)
        .replace("{status}", &status_str)
        .replace("{cwd}", &cwd.display().to_string())
}
