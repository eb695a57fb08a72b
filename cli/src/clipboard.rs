//! Clipboards available from a terminal.
use std::io::{self, Write};
use std::process::{Command, Stdio};

use tracing::{event, Level};

use inspector::Clipboard;

/// Hands copied text to an external program on its standard input,
/// for example `xclip -selection clipboard` or `pbcopy`.
#[derive(Debug)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Splits `command_line` on whitespace.  Returns `None` if it is
    /// blank.
    pub fn new(command_line: &str) -> Option<CommandClipboard> {
        let mut words = command_line.split_whitespace().map(str::to_owned);
        let program = words.next()?;
        Some(CommandClipboard {
            program,
            args: words.collect(),
        })
    }
}

impl Clipboard for CommandClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), io::Error> {
        event!(
            Level::DEBUG,
            "running {} {:?} to copy {text:?}",
            self.program,
            self.args
        );
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .spawn()?;
        // Closing stdin (by dropping it) lets the program finish.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        // Reap the child even if writing failed.
        let status = child.wait();
        written?;
        let status = status?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} failed ({status})", self.program),
            ))
        }
    }
}

/// Used when no clipboard program is configured: the text is
/// printed so that the user can copy it with the terminal.
#[derive(Debug, Default)]
pub struct PrintClipboard;

impl Clipboard for PrintClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), io::Error> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{text}").and_then(|()| handle.flush())
    }
}
