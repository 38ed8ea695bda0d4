//! Line parsing: tokenization and pipeline planning.
//!
//! Tokens are plain strings once quoting and escaping are resolved. The pipe
//! separator is the token `|` standing on its own; `a|b` is a single token.
mod pipeline_planner;
mod tokenizer;

pub use pipeline_planner::split_pipeline;
pub use tokenizer::{parse_line, parse_line_lenient};

pub const PIPE_SEPARATOR: &str = "|";

/// One program-plus-arguments unit of a pipeline. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSegment {
    args: Vec<String>,
}

impl CommandSegment {
    /// Returns `None` for an empty argument vector.
    pub fn new(args: Vec<String>) -> Option<Self> {
        if args.is_empty() {
            None
        } else {
            Some(Self { args })
        }
    }

    pub fn program(&self) -> &str {
        &self.args[0]
    }

    /// Arguments after the program name.
    pub fn arguments(&self) -> &[String] {
        &self.args[1..]
    }

    /// Full argument vector, program name included.
    pub fn argv(&self) -> &[String] {
        &self.args
    }
}

/// Ordered stages of one command line. Length 1 means a direct launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinePlan {
    segments: Vec<CommandSegment>,
}

impl PipelinePlan {
    pub(crate) fn from_segments(segments: Vec<CommandSegment>) -> Self {
        debug_assert!(!segments.is_empty());
        Self { segments }
    }

    pub fn segments(&self) -> &[CommandSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_pipeline(&self) -> bool {
        self.segments.len() > 1
    }
}
