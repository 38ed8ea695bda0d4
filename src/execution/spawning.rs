use std::fs;
use std::io;
use std::os::fd::OwnedFd;
use std::process::{Child, Command, Stdio};

use log::debug;

use crate::error::{ErrorKind, ShellError, ShellResult};
use crate::parse::CommandSegment;

/// Build the command for one stage. Missing ends inherit the shell's own
/// standard streams.
pub(crate) fn build_stage_command(
    segment: &CommandSegment,
    stdin: Option<OwnedFd>,
    stdout: Option<OwnedFd>,
) -> Command {
    let mut command = Command::new(segment.program());
    command.args(segment.arguments());
    if let Some(fd) = stdin {
        command.stdin(Stdio::from(fd));
    }
    if let Some(fd) = stdout {
        command.stdout(Stdio::from(fd));
    }
    command
}

/// Spawn one stage. The pipe ends passed in are owned by the command and are
/// closed in the parent as soon as this returns, whether or not the spawn
/// succeeded.
pub(crate) fn spawn_stage(
    idx: usize,
    segment: &CommandSegment,
    stdin: Option<OwnedFd>,
    stdout: Option<OwnedFd>,
) -> ShellResult<Child> {
    let piped_in = stdin.is_some();
    let piped_out = stdout.is_some();
    let mut command = build_stage_command(segment, stdin, stdout);
    let child = command
        .spawn()
        .map_err(|err| wrap_spawn_error(segment.program(), err))?;
    debug!(
        "pipeline event=spawn idx={} pid={} program={} stdin={} stdout={}",
        idx,
        child.id(),
        segment.program(),
        if piped_in { "pipe" } else { "tty" },
        if piped_out { "pipe" } else { "tty" },
    );
    Ok(child)
}

/// Classify a failed spawn. Load failures (missing program, not executable)
/// are exec errors; anything else means the process could not be created.
pub(crate) fn wrap_spawn_error(cmd: &str, err: io::Error) -> ShellError {
    let kind = err.kind();
    match kind {
        io::ErrorKind::NotFound => {
            ShellError::new(ErrorKind::Exec, format!("{cmd}: command not found")).with_io_kind(kind)
        }
        io::ErrorKind::PermissionDenied => {
            let message = if cmd.contains('/') && fs::metadata(cmd).is_ok_and(|meta| meta.is_dir()) {
                format!("{cmd}: is a directory")
            } else {
                format!("{cmd}: permission denied")
            };
            ShellError::new(ErrorKind::Exec, message).with_io_kind(kind)
        }
        io::ErrorKind::InvalidInput => {
            ShellError::new(ErrorKind::Exec, format!("{cmd}: {err}")).with_io_kind(kind)
        }
        _ => ShellError::new(ErrorKind::Spawn, format!("{cmd}: {err}")).with_io_kind(kind),
    }
}
