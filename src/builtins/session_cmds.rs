use std::env;
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;

use super::{builtin_names, BuiltinIo, Flow};
use crate::SHELL_NAME;

pub(super) fn exit(_args: &[String], _io: &mut BuiltinIo<'_>) -> Flow {
    Flow::Exit
}

pub(super) fn help(_args: &[String], io: &mut BuiltinIo<'_>) -> Flow {
    let result = write_help(io.out);
    report(io, "help", result)
}

/// Inherited environment as `NAME=value`, in the order the process received it.
pub(super) fn env(_args: &[String], io: &mut BuiltinIo<'_>) -> Flow {
    let result = write_env(io.out);
    report(io, "env", result)
}

fn write_help(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{SHELL_NAME}")?;
    writeln!(out, "Type program names and arguments, and hit enter.")?;
    writeln!(out, "Chain programs with | (spaces around it); *, ? and [ expand to file names.")?;
    writeln!(out, "The following are built in:")?;
    for name in builtin_names() {
        writeln!(out, "  {name}")?;
    }
    writeln!(out, "Use the man command for information on other programs.")
}

fn write_env(out: &mut dyn Write) -> io::Result<()> {
    for (name, value) in env::vars_os() {
        out.write_all(name.as_bytes())?;
        out.write_all(b"=")?;
        out.write_all(value.as_bytes())?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

fn report(io: &mut BuiltinIo<'_>, name: &str, result: io::Result<()>) -> Flow {
    match result {
        Ok(()) => Flow::Continue(0),
        Err(err) => {
            let _ = writeln!(io.err, "{SHELL_NAME}: {name}: {err}");
            Flow::Continue(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::run_captured;
    use serial_test::serial;

    #[test]
    fn exit_ignores_arguments() {
        let (flow, out, err) = run_captured(exit, &["exit", "3", "now"]);
        assert_eq!(flow, Flow::Exit);
        assert!(out.is_empty() && err.is_empty());
    }

    #[test]
    fn help_lists_builtins_in_order() {
        let (flow, out, _) = run_captured(help, &["help"]);
        assert_eq!(flow, Flow::Continue(0));
        let listed: Vec<&str> = out
            .lines()
            .filter_map(|line| line.strip_prefix("  "))
            .collect();
        assert_eq!(listed, vec!["cd", "help", "exit", "pwd", "env"]);
    }

    #[test]
    #[serial]
    fn env_prints_inherited_pairs() {
        let (flow, out, _) = run_captured(env, &["env"]);
        assert_eq!(flow, Flow::Continue(0));
        let expected: Vec<String> = env::vars_os()
            .map(|(k, v)| format!("{}={}", k.to_string_lossy(), v.to_string_lossy()))
            .collect();
        let printed: Vec<&str> = out.lines().collect();
        assert_eq!(printed.len(), expected.len());
        if let Ok(path) = env::var("PATH") {
            assert!(printed.contains(&format!("PATH={path}").as_str()));
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_reported() {
        let mut out = BrokenPipe;
        let mut err = Vec::new();
        let mut io = BuiltinIo {
            out: &mut out,
            err: &mut err,
        };
        assert_eq!(help(&["help".to_string()], &mut io), Flow::Continue(1));
        assert!(String::from_utf8_lossy(&err).starts_with("seash: help: "));
    }
}
