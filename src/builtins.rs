//! Builtin commands run inside the shell process: never globbed, piped or forked.
use std::collections::HashMap;
use std::io::Write;

use log::debug;

mod dir_cmds;
mod session_cmds;

/// What the read loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading; carries the command's status.
    Continue(i32),
    /// Stop the read loop.
    Exit,
}

/// Output streams handed to a builtin.
pub struct BuiltinIo<'a> {
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

pub type BuiltinFn = fn(&[String], &mut BuiltinIo<'_>) -> Flow;

// Registration order; `help` lists builtins in this order.
const STANDARD_BUILTINS: [(&str, BuiltinFn); 5] = [
    ("cd", dir_cmds::cd),
    ("help", session_cmds::help),
    ("exit", session_cmds::exit),
    ("pwd", dir_cmds::pwd),
    ("env", session_cmds::env),
];

pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    STANDARD_BUILTINS.iter().map(|(name, _)| *name)
}

/// Name to handler mapping, built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct BuiltinTable {
    handlers: HashMap<&'static str, BuiltinFn>,
}

impl BuiltinTable {
    pub fn standard() -> Self {
        Self {
            handlers: STANDARD_BUILTINS.into_iter().collect(),
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, name: &str) -> Option<BuiltinFn> {
        self.handlers.get(name).copied()
    }

    /// Run the builtin named by the first token, if there is one.
    pub fn dispatch(&self, tokens: &[String], io: &mut BuiltinIo<'_>) -> Option<Flow> {
        let name = tokens.first()?;
        let handler = self.get(name)?;
        debug!("builtin event=dispatch name={}", name);
        Some(handler(tokens, io))
    }
}

#[cfg(test)]
pub(crate) fn run_captured(
    handler: BuiltinFn,
    args: &[&str],
) -> (Flow, String, String) {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let mut out = Vec::new();
    let mut err = Vec::new();
    let flow = {
        let mut io = BuiltinIo {
            out: &mut out,
            err: &mut err,
        };
        handler(&args, &mut io)
    };
    (
        flow,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}
