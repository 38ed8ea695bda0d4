use crate::error::{ErrorKind, ShellError, ShellResult};
use crate::parse::{CommandSegment, PipelinePlan, PIPE_SEPARATOR};

/// Partition expanded tokens at `|` separators.
///
/// An empty segment (leading, trailing or doubled separator) is rejected with
/// the token index of the separator that produced it.
pub fn split_pipeline(tokens: Vec<String>) -> ShellResult<PipelinePlan> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    let mut last_separator = None;

    for (idx, token) in tokens.into_iter().enumerate() {
        if token == PIPE_SEPARATOR {
            let Some(segment) = CommandSegment::new(std::mem::take(&mut current)) else {
                return Err(empty_segment(idx, segments.is_empty()));
            };
            segments.push(segment);
            last_separator = Some(idx);
            continue;
        }
        current.push(token);
    }

    match CommandSegment::new(current) {
        Some(segment) => segments.push(segment),
        None => {
            return Err(match last_separator {
                Some(idx) => ShellError::new(
                    ErrorKind::Syntax,
                    format!("trailing pipe at token {idx}"),
                )
                .with_context("a command must follow '|'")
                .with_position(idx),
                None => ShellError::new(ErrorKind::Syntax, "empty command").with_position(0),
            });
        }
    }

    Ok(PipelinePlan::from_segments(segments))
}

fn empty_segment(idx: usize, leading: bool) -> ShellError {
    let message = if leading {
        format!("pipe without a command before it at token {idx}")
    } else {
        format!("empty command in pipeline at token {idx}")
    };
    ShellError::new(ErrorKind::Syntax, message)
        .with_context("commands go on both sides of '|'")
        .with_position(idx)
}
