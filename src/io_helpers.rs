use std::io::{self, BufRead};

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

pub type LineEditor = Editor<(), DefaultHistory>;

/// Next input line without its terminator, or `None` at end of input.
///
/// With an editor, Ctrl-C yields an empty line. Without one, lines come from
/// stdin and no prompt is shown.
pub fn read_input_line(editor: Option<&mut LineEditor>, prompt: &str) -> io::Result<Option<String>> {
    if let Some(editor) = editor {
        return match editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(io::Error::other(err)),
        };
    }
    let mut raw = Vec::new();
    let bytes = io::stdin().lock().read_until(b'\n', &mut raw)?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(strip_line_ending(decode_line(raw))))
}

// Invalid UTF-8 is replaced rather than ending the session.
fn decode_line(raw: Vec<u8>) -> String {
    match String::from_utf8(raw) {
        Ok(line) => line,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
