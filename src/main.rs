use std::env;

use seash::builtins::Flow;
use seash::SHELL_NAME;

mod io_helpers;
mod repl;

use repl::{init_state, Options};

fn main() {
    init_logging();
    let options = parse_args(env::args().skip(1));
    let interactive = unsafe { libc::isatty(libc::STDIN_FILENO) == 1 };

    let mut state = match init_state(options, interactive) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("{SHELL_NAME}: {err}");
            return;
        }
    };

    loop {
        match state.run_once() {
            Ok(Flow::Continue(_)) => {}
            Ok(Flow::Exit) => break,
            Err(err) => {
                // A broken input stream will not recover.
                eprintln!("{SHELL_NAME}: {err}");
                break;
            }
        }
    }
    state.save_history();
}

fn init_logging() {
    let env = env_logger::Env::default().filter_or("SEASH_LOG", "info");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}

fn parse_args(args: impl Iterator<Item = String>) -> Options {
    let mut options = Options::default();
    for arg in args {
        match arg.as_str() {
            "-x" => options.trace = true,
            "--strict-quotes" => options.strict_quotes = true,
            "--norc" => options.no_rc = true,
            other => eprintln!("{SHELL_NAME}: unknown option: {other}"),
        }
    }
    options
}
