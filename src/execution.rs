//! Process launch for a pipeline plan.
//!
//! N stages get N-1 pipes, allocated before anything is spawned. Stage `i`
//! reads from pipe `i-1` and writes to pipe `i`; the first and last stages use
//! the shell's own standard streams. The shell never runs a stage itself, it
//! only spawns and then waits for every child.
use std::io::{self, Write};
use std::os::unix::process::ExitStatusExt;
use std::process::{Child, ExitStatus};

use log::{debug, warn};

use crate::error::ShellResult;
use crate::parse::PipelinePlan;
use crate::SHELL_NAME;

mod pipes;
mod spawning;

use pipes::open_pipes;
use spawning::spawn_stage;

/// What happened to one launched line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// Stages that became processes and were waited on.
    pub spawned: usize,
    /// Stages that could not be spawned (reported on stderr).
    pub failed: usize,
    /// Exit status of the last stage, or its error status if it failed to spawn.
    pub last_status: Option<i32>,
}

impl LaunchOutcome {
    pub fn status(&self) -> i32 {
        self.last_status.unwrap_or(0)
    }
}

/// Spawn every stage of `plan`, then block until all of them have exited.
///
/// A stage that fails to spawn is reported and skipped; stages already running
/// are left alone and still waited on. Only pipe allocation failure aborts the
/// line, and it happens before any child exists.
pub fn launch(plan: &PipelinePlan) -> ShellResult<LaunchOutcome> {
    let stage_count = plan.len();
    let mut pipes = open_pipes(stage_count.saturating_sub(1))?;
    debug!(
        "pipeline event=start stages={} pipes={}",
        stage_count,
        pipes.len()
    );

    // Children inherit our stdout; anything still buffered must go first.
    if let Err(err) = io::stdout().flush() {
        debug!("pipeline event=flush error={}", err);
    }

    let mut children: Vec<(usize, Child)> = Vec::with_capacity(stage_count);
    let mut outcome = LaunchOutcome {
        spawned: 0,
        failed: 0,
        last_status: None,
    };

    for (idx, segment) in plan.segments().iter().enumerate() {
        let stdin = if idx > 0 {
            pipes[idx - 1].take_read()
        } else {
            None
        };
        let stdout = if idx + 1 < stage_count {
            pipes[idx].take_write()
        } else {
            None
        };
        match spawn_stage(idx, segment, stdin, stdout) {
            Ok(child) => {
                children.push((idx, child));
                outcome.spawned += 1;
            }
            Err(err) => {
                eprintln!("{SHELL_NAME}: {err}");
                outcome.failed += 1;
                if idx + 1 == stage_count {
                    outcome.last_status = Some(err.exit_status());
                }
            }
        }
    }

    // Every end has been moved into a stage by now; this closes any stragglers.
    drop(pipes);

    for (idx, mut child) in children {
        let pid = child.id();
        match child.wait() {
            Ok(status) => {
                let code = exit_status_code(status);
                debug!("pipeline event=exit idx={} pid={} status={}", idx, pid, code);
                if idx + 1 == stage_count {
                    outcome.last_status = Some(code);
                }
            }
            Err(err) => warn!("pipeline event=wait idx={} pid={} error={}", idx, pid, err),
        }
    }

    debug!(
        "pipeline event=done spawned={} failed={} status={:?}",
        outcome.spawned, outcome.failed, outcome.last_status
    );
    Ok(outcome)
}

fn exit_status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        code
    } else if let Some(sig) = status.signal() {
        128 + sig
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{parse_line, split_pipeline};

    fn run(line: &str) -> LaunchOutcome {
        let plan = split_pipeline(parse_line(line).unwrap()).unwrap();
        launch(&plan).unwrap()
    }

    #[test]
    fn single_stage_reports_status() {
        assert_eq!(run("true").last_status, Some(0));
        assert_eq!(run("false").last_status, Some(1));
        assert_eq!(run("sh -c 'exit 3'").status(), 3);
    }

    #[test]
    fn data_crosses_every_pipe() {
        let outcome = run("printf 'hi\\n' | cat | grep -q hi");
        assert_eq!(outcome.spawned, 3);
        assert_eq!(outcome.failed, 0);
        assert_eq!(outcome.last_status, Some(0));

        assert_eq!(run("printf 'hi\\n' | grep -q nope").last_status, Some(1));
    }

    #[test]
    fn last_stage_status_wins() {
        assert_eq!(run("false | true").last_status, Some(0));
        assert_eq!(run("true | false").last_status, Some(1));
    }

    #[test]
    fn writer_sees_closed_reader() {
        // Only terminates if no stray copy of the pipe's read end stays open.
        let outcome = run("yes | head -n 1 | grep -q y");
        assert_eq!(outcome.last_status, Some(0));
    }

    #[test]
    fn reader_sees_eof() {
        // `cat` only exits once every write end of its input pipe is closed.
        assert_eq!(run("true | cat").last_status, Some(0));
    }

    #[test]
    fn signal_death_maps_to_128_plus() {
        assert_eq!(run("sh -c 'kill -9 $$'").last_status, Some(137));
    }

    #[test]
    fn missing_program_is_reported_not_fatal() {
        let outcome = run("seash-no-such-program-xyz arg");
        assert_eq!(outcome.spawned, 0);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.last_status, Some(127));
    }

    #[test]
    fn failed_middle_stage_keeps_siblings() {
        let outcome = run("printf hi | seash-no-such-program-xyz | cat");
        assert_eq!(outcome.spawned, 2);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.last_status, Some(0));
    }
}
