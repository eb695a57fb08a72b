use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::ArgAction::{Set, SetTrue};
use clap::Parser;
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

use bitword::codec;
use inspector::{Clipboard, EventOutcome, Inspector, Settings, View};

mod clipboard;
mod command;
mod terminal;

use clipboard::{CommandClipboard, PrintClipboard};
use command::{parse_command, Command, CommandError, HELP};
use terminal::TerminalView;

const SETTINGS_FILE_NAME: &str = ".bitinspect.json";

/// Inspect and edit a fixed-width integer in hex, decimal, octal,
/// binary and bit-by-bit form
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Cli {
    /// File in which settings (width, sign mode, shift amount) are
    /// kept.  Defaults to .bitinspect.json in your home directory.
    #[clap(action = Set, long)]
    settings: Option<PathBuf>,

    /// Don't save settings on exit.
    #[clap(action = SetTrue, long)]
    no_save: bool,

    /// Program which receives copied text on its standard input (for
    /// example "xclip -selection clipboard").  Without this, copied
    /// text is printed.
    #[clap(action = Set, long)]
    clipboard_command: Option<String>,

    /// After running the commands, print every representation as
    /// JSON instead of drawing the panel.
    #[clap(action = SetTrue, long)]
    json: bool,

    /// Commands to run (each one quoted, e.g. "hex FF" "shl 1").
    /// Without any, commands are read from standard input.
    commands: Vec<String>,
}

#[derive(Debug)]
enum Fail {
    /// A command given on the command line was not understood.
    BadCommand(CommandError),
    /// Reading commands or writing the display failed.
    Io(io::Error),
    /// We were not able to correctly initialise.
    InitialisationFailure(String),
}

impl Display for Fail {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Fail::BadCommand(e) => e.fmt(f),
            Fail::Io(e) => write!(f, "I/O error: {e}"),
            Fail::InitialisationFailure(msg) => f.write_str(msg.as_str()),
        }
    }
}

impl Error for Fail {}

impl From<io::Error> for Fail {
    fn from(e: io::Error) -> Fail {
        Fail::Io(e)
    }
}

fn default_settings_path() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(SETTINGS_FILE_NAME),
        None => PathBuf::from(SETTINGS_FILE_NAME),
    }
}

enum Next {
    Continue,
    Quit,
}

struct Session {
    inspector: Inspector,
    view: TerminalView,
    clipboard: Box<dyn Clipboard>,
    settings_path: PathBuf,
}

impl Session {
    fn save_settings(&mut self) {
        let settings = self.inspector.settings();
        if let Err(e) = settings.save(&self.settings_path) {
            event!(Level::WARN, "failed to save settings: {e}");
            self.view.show_status(&format!(
                "could not save settings to {}: {e}",
                self.settings_path.display()
            ));
        }
    }

    /// Runs one command.  `draw` says whether to redraw the panel
    /// after a change.
    fn execute(&mut self, command: Command, draw: bool) -> Result<Next, Fail> {
        match command {
            Command::Event(input) => {
                match self.inspector.dispatch(input, &mut self.view) {
                    EventOutcome::Applied | EventOutcome::Pending => {
                        if draw {
                            self.view.render(&self.inspector)?;
                        }
                    }
                    EventOutcome::Ignored => {
                        self.view.show_status("no change");
                    }
                    EventOutcome::Suppressed => {
                        event!(Level::WARN, "command was unexpectedly suppressed");
                    }
                    EventOutcome::Rejected(why) => {
                        self.view.show_status(&why.to_string());
                    }
                }
            }
            Command::Show => self.view.render(&self.inspector)?,
            Command::Copy(field) => {
                if let Err(e) = self.inspector.copy_field(field, self.clipboard.as_mut()) {
                    self.view.show_status(&format!("copy failed: {e}"));
                }
            }
            Command::Save => self.save_settings(),
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(Next::Quit),
        }
        self.view.flush_status()?;
        Ok(Next::Continue)
    }

    fn interactive(&mut self) -> Result<(), Fail> {
        let prompt = atty::is(atty::Stream::Stdin);
        self.view.render(&self.inspector)?;
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            if prompt {
                print!("> ");
                io::stdout().flush()?;
            }
            let line = match lines.next() {
                None => break,
                Some(line) => line?,
            };
            match parse_command(&line) {
                Ok(None) => (),
                Ok(Some(command)) => {
                    if let Next::Quit = self.execute(command, true)? {
                        break;
                    }
                }
                Err(e) => {
                    self.view.show_status(&e.to_string());
                    self.view.flush_status()?;
                }
            }
        }
        Ok(())
    }

    fn one_shot(&mut self, commands: &[String], json: bool) -> Result<(), Fail> {
        for line in commands {
            match parse_command(line).map_err(Fail::BadCommand)? {
                None => (),
                Some(command) => {
                    if let Next::Quit = self.execute(command, false)? {
                        break;
                    }
                }
            }
        }
        if json {
            let reps = codec::format(
                self.inspector.value(),
                self.inspector.width(),
                self.inspector.sign_mode(),
            );
            match serde_json::to_string_pretty(&reps) {
                Ok(text) => println!("{text}"),
                Err(e) => {
                    return Err(Fail::Io(io::Error::new(io::ErrorKind::Other, e)));
                }
            }
        } else {
            self.view.render(&self.inspector)?;
        }
        Ok(())
    }
}

fn run_inspector() -> Result<(), Fail> {
    let cli = Cli::parse();

    // See
    // https://docs.rs/tracing-subscriber/0.2.19/tracing_subscriber/fmt/index.html#filtering-events-with-environment-variables
    // for instructions on how to select which trace messages get
    // printed.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(io::stderr);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("warn"))
    {
        Err(e) => {
            return Err(Fail::InitialisationFailure(format!(
                "failed to initialise tracing filter (perhaps there is a problem with environment variables): {e}"
            )));
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let settings_path = cli.settings.unwrap_or_else(default_settings_path);
    let span = span!(Level::ERROR, "bitinspect", settings=?settings_path);
    let _enter = span.enter();

    let settings = Settings::load(&settings_path);
    let clipboard: Box<dyn Clipboard> = match cli
        .clipboard_command
        .as_deref()
        .and_then(CommandClipboard::new)
    {
        Some(command) => Box::new(command),
        None => Box::new(PrintClipboard),
    };
    let mut session = Session {
        inspector: Inspector::new(&settings),
        view: TerminalView::new(),
        clipboard,
        settings_path,
    };
    session.inspector.refresh(&mut session.view);

    let result = if cli.commands.is_empty() {
        session.interactive()
    } else {
        session.one_shot(&cli.commands, cli.json)
    };
    if !cli.no_save {
        session.save_settings();
        session.view.flush_status()?;
    }
    result
}

fn main() {
    match run_inspector() {
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}
