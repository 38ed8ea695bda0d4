use std::env;
use std::io::Write;

use log::debug;

use super::{BuiltinIo, Flow};
use crate::error::{ErrorKind, ShellError};
use crate::expansion::expand_tilde;
use crate::SHELL_NAME;

pub(super) fn cd(args: &[String], io: &mut BuiltinIo<'_>) -> Flow {
    let Some(target) = args.get(1) else {
        let err = ShellError::new(ErrorKind::BuiltinUsage, "cd: missing directory operand")
            .with_context("usage: cd <dir>");
        let _ = writeln!(io.err, "{SHELL_NAME}: {err}");
        return Flow::Continue(err.exit_status());
    };
    let path = expand_tilde(target).unwrap_or_else(|| target.clone());
    match env::set_current_dir(&path) {
        Ok(()) => {
            debug!("builtin event=cd dir={}", path);
            Flow::Continue(0)
        }
        Err(err) => {
            let _ = writeln!(io.err, "{SHELL_NAME}: cd: {path}: {err}");
            Flow::Continue(1)
        }
    }
}

pub(super) fn pwd(_args: &[String], io: &mut BuiltinIo<'_>) -> Flow {
    match env::current_dir() {
        Ok(cwd) => match writeln!(io.out, "{}", cwd.display()) {
            Ok(()) => Flow::Continue(0),
            Err(err) => {
                let _ = writeln!(io.err, "{SHELL_NAME}: pwd: {err}");
                Flow::Continue(1)
            }
        },
        Err(err) => {
            let _ = writeln!(io.err, "{SHELL_NAME}: pwd: {err}");
            Flow::Continue(1)
        }
    }
}
