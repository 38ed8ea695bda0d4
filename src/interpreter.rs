//! One line in, one `Flow` out: tokenize, builtin short-circuit, glob, plan,
//! launch.
use std::io::{self, Write};

use log::debug;

use crate::builtins::{BuiltinIo, BuiltinTable, Flow};
use crate::error::ShellError;
use crate::execution::launch;
use crate::expansion::expand_globs;
use crate::parse::{parse_line, parse_line_lenient, split_pipeline, PipelinePlan};
use crate::SHELL_NAME;

pub struct Interpreter<'a> {
    builtins: &'a BuiltinTable,
    strict_quotes: bool,
    trace: bool,
}

impl<'a> Interpreter<'a> {
    pub fn new(builtins: &'a BuiltinTable) -> Self {
        Self {
            builtins,
            strict_quotes: false,
            trace: false,
        }
    }

    /// Reject unterminated quotes instead of accepting what was accumulated.
    pub fn strict_quotes(mut self, strict: bool) -> Self {
        self.strict_quotes = strict;
        self
    }

    /// Print `trace: <label>: <tokens>` lines to stderr at each stage.
    pub fn trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Run one input line to completion. Errors are reported here and only
    /// show up in the returned status.
    pub fn interpret(&self, line: &str) -> Flow {
        let tokens = if self.strict_quotes {
            match parse_line(line) {
                Ok(tokens) => tokens,
                Err(err) => {
                    eprintln!("{SHELL_NAME}: {}", err.display_with_input(line));
                    return Flow::Continue(err.exit_status());
                }
            }
        } else {
            parse_line_lenient(line)
        };
        self.trace_tokens("parsed tokens", &tokens);

        if tokens.is_empty() {
            return Flow::Continue(0);
        }

        if let Some(flow) = self.run_builtin(&tokens) {
            return flow;
        }

        let expanded = expand_globs(tokens);
        self.trace_tokens("globbed tokens", &expanded);

        let plan = match split_pipeline(expanded) {
            Ok(plan) => plan,
            Err(err) => return report(&err),
        };
        self.trace_plan(&plan);

        match launch(&plan) {
            Ok(outcome) => Flow::Continue(outcome.status()),
            Err(err) => report(&err),
        }
    }

    fn run_builtin(&self, tokens: &[String]) -> Option<Flow> {
        let stdout = io::stdout();
        let stderr = io::stderr();
        let mut out = stdout.lock();
        let mut err = stderr.lock();
        let flow = {
            let mut io = BuiltinIo {
                out: &mut out,
                err: &mut err,
            };
            self.builtins.dispatch(tokens, &mut io)?
        };
        if let Err(err) = out.flush() {
            debug!("builtin event=flush name={} error={}", tokens[0], err);
        }
        Some(flow)
    }

    fn trace_tokens(&self, label: &str, tokens: &[String]) {
        if self.trace {
            eprintln!("trace: {label}: {tokens:?}");
        }
    }

    fn trace_plan(&self, plan: &PipelinePlan) {
        if !self.trace {
            return;
        }
        for (idx, segment) in plan.segments().iter().enumerate() {
            eprintln!("trace: argv[{idx}]: {:?}", segment.argv());
        }
    }
}

fn report(err: &ShellError) -> Flow {
    eprintln!("{SHELL_NAME}: {err}");
    Flow::Continue(err.exit_status())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn blank_lines_succeed() {
        let table = BuiltinTable::standard();
        let interp = Interpreter::new(&table);
        assert_eq!(interp.interpret(""), Flow::Continue(0));
        assert_eq!(interp.interpret("     "), Flow::Continue(0));
        assert_eq!(interp.interpret("\"\" ''"), Flow::Continue(0));
    }

    #[test]
    fn exit_wins_over_pipes() {
        let table = BuiltinTable::standard();
        let interp = Interpreter::new(&table);
        assert_eq!(interp.interpret("exit"), Flow::Exit);
        assert_eq!(interp.interpret("exit 1 | cat"), Flow::Exit);
        assert_eq!(interp.interpret("  exit  "), Flow::Exit);
    }

    #[test]
    fn external_status_flows_back() {
        let table = BuiltinTable::standard();
        let interp = Interpreter::new(&table);
        assert_eq!(interp.interpret("true"), Flow::Continue(0));
        assert_eq!(interp.interpret("false"), Flow::Continue(1));
        assert_eq!(interp.interpret("printf x | grep -q x"), Flow::Continue(0));
        assert_eq!(
            interp.interpret("seash-no-such-program-xyz"),
            Flow::Continue(127)
        );
    }

    #[test]
    fn malformed_pipelines_never_launch() {
        let table = BuiltinTable::standard();
        let interp = Interpreter::new(&table);
        assert_eq!(interp.interpret("| true"), Flow::Continue(2));
        assert_eq!(interp.interpret("true |"), Flow::Continue(2));
        assert_eq!(interp.interpret("true | | true"), Flow::Continue(2));
    }

    #[test]
    fn quote_profiles() {
        let table = BuiltinTable::standard();
        let lenient = Interpreter::new(&table);
        assert_eq!(lenient.interpret("sh -c 'exit 4"), Flow::Continue(4));
        let strict = Interpreter::new(&table).strict_quotes(true);
        assert_eq!(strict.interpret("sh -c 'exit 4"), Flow::Continue(2));
        assert_eq!(strict.interpret("sh -c 'exit 4'"), Flow::Continue(4));
    }

    #[test]
    #[serial]
    fn globs_expand_for_programs_only() {
        let before = env::current_dir().unwrap();
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        env::set_current_dir(dir.path()).unwrap();

        let table = BuiltinTable::standard();
        let interp = Interpreter::new(&table).trace(true);
        let both = interp.interpret("sh -c 'test \"$1 $2\" = \"a.txt b.txt\"' sh *.txt");
        let literal = interp.interpret("sh -c 'test \"$1\" = \"*.nope\"' sh *.nope");
        // A builtin sees the pattern untouched; cd to a literal `*` fails.
        let cd = interp.interpret("cd *");

        env::set_current_dir(before).unwrap();
        assert_eq!(both, Flow::Continue(0));
        assert_eq!(literal, Flow::Continue(0));
        assert_eq!(cd, Flow::Continue(1));
    }
}
