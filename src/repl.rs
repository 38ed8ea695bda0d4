use std::env;
use std::io;
use std::path::PathBuf;

use log::{debug, warn};
use rustyline::{Config, EditMode, Editor};

use seash::builtins::{BuiltinTable, Flow};
use seash::config::{build_prompt, load_config, ShellConfig};
use seash::interpreter::Interpreter;
use seash::SHELL_NAME;

use crate::io_helpers::{read_input_line, LineEditor};

const HISTORY_FILE_NAME: &str = ".seash_history";

/// Command-line switches.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Options {
    pub(crate) trace: bool,
    pub(crate) strict_quotes: bool,
    pub(crate) no_rc: bool,
}

pub(crate) struct ShellState {
    // Only present when stdin is a terminal.
    editor: Option<LineEditor>,
    builtins: BuiltinTable,
    config: ShellConfig,
    last_status: i32,
    trace: bool,
}

pub(crate) fn init_state(options: Options, interactive: bool) -> io::Result<ShellState> {
    let mut config = ShellConfig::default();
    if !options.no_rc {
        if let Err(err) = load_config(&mut config) {
            eprintln!("{SHELL_NAME}: config: {err}");
        }
    }
    if options.strict_quotes {
        config.strict_quotes = true;
    }

    let editor = if interactive {
        let edit_mode = match env::var("SEASH_EDITMODE").ok().as_deref() {
            Some("vi") | Some("VI") => EditMode::Vi,
            _ => EditMode::Emacs,
        };
        let editor_config = Config::builder()
            .auto_add_history(true)
            .edit_mode(edit_mode)
            .build();
        let mut editor: LineEditor = Editor::with_config(editor_config).map_err(io::Error::other)?;
        if let Some(path) = history_path() {
            if let Err(err) = editor.load_history(&path) {
                debug!("history event=load path={} error={}", path.display(), err);
            }
        }
        Some(editor)
    } else {
        None
    };

    Ok(ShellState {
        editor,
        builtins: BuiltinTable::standard(),
        config,
        last_status: 0,
        trace: options.trace,
    })
}

impl ShellState {
    /// Read and run one line. Returns `Flow::Exit` on `exit` or end of input.
    pub(crate) fn run_once(&mut self) -> io::Result<Flow> {
        let cwd = env::current_dir().unwrap_or_else(|_| "/".into());
        let prompt = build_prompt(
            self.editor.is_some(),
            &self.config.prompt_template,
            self.last_status,
            &cwd,
        );

        let Some(line) = read_input_line(self.editor.as_mut(), &prompt)? else {
            if self.editor.is_some() {
                println!();
            }
            return Ok(Flow::Exit);
        };

        let interpreter = Interpreter::new(&self.builtins)
            .strict_quotes(self.config.strict_quotes)
            .trace(self.trace);
        let flow = interpreter.interpret(&line);
        if let Flow::Continue(status) = flow {
            self.last_status = status;
        }
        Ok(flow)
    }

    pub(crate) fn save_history(&mut self) {
        let (Some(editor), Some(path)) = (self.editor.as_mut(), history_path()) else {
            return;
        };
        if let Err(err) = editor.save_history(&path) {
            warn!("history event=save path={} error={}", path.display(), err);
        }
    }
}

fn history_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(HISTORY_FILE_NAME))
}
