//! Parsing of the commands typed at the `bitinspect` prompt.
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use bitword::prelude::*;
use inspector::InputEvent;

pub const HELP: &str = "\
Commands:
  hex|dec|oct|bin [TEXT]   set the value from a numeral (no TEXT means zero)
  amount [N]               set the shift/rotate amount
  bit N                    toggle bit N (0 is least significant)
  width BYTES              set the word width (1 to 8 bytes)
  signed on|off            show decimal as signed or unsigned
  shl|lsr|asr|rol|ror [N]  shift or rotate (by the current amount if N is omitted)
  invert|reverse|clear     transform the whole word
  show                     redraw the panel
  copy hex|dec|oct|bin     copy a field's text
  save                     save settings now
  help                     show this text
  quit                     leave";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Event(InputEvent),
    Show,
    Copy(Base),
    Save,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    MissingArgument {
        command: String,
        what: &'static str,
    },
    BadArgument {
        command: String,
        argument: String,
    },
    TooManyArguments(String),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            CommandError::Unknown(name) => {
                write!(f, "unknown command '{name}' (try 'help')")
            }
            CommandError::MissingArgument { command, what } => {
                write!(f, "'{command}' needs {what}")
            }
            CommandError::BadArgument { command, argument } => {
                write!(f, "'{argument}' is not a valid argument for '{command}'")
            }
            CommandError::TooManyArguments(command) => {
                write!(f, "too many arguments for '{command}'")
            }
        }
    }
}

impl Error for CommandError {}

fn bad_argument(command: &str, argument: &str) -> CommandError {
    CommandError::BadArgument {
        command: command.to_owned(),
        argument: argument.to_owned(),
    }
}

fn required<'a>(
    command: &str,
    argument: Option<&'a str>,
    what: &'static str,
) -> Result<&'a str, CommandError> {
    argument.ok_or_else(|| CommandError::MissingArgument {
        command: command.to_owned(),
        what,
    })
}

/// Parses one line.  Blank lines and lines starting with `#` yield
/// `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let name = match words.next() {
        None => return Ok(None),
        Some(word) if word.starts_with('#') => return Ok(None),
        Some(word) => word,
    };
    let argument = words.next();
    if words.next().is_some() {
        return Err(CommandError::TooManyArguments(name.to_owned()));
    }
    let no_argument = |command: Command| match argument {
        None => Ok(Some(command)),
        Some(_) => Err(CommandError::TooManyArguments(name.to_owned())),
    };

    if let Ok(field) = Base::try_from(name) {
        return Ok(Some(Command::Event(InputEvent::TextEdited {
            field,
            text: argument.unwrap_or_default().to_owned(),
        })));
    }
    if let Ok(op) = Operation::try_from(name) {
        let amount = match argument {
            None => None,
            Some(_) if !op.takes_amount() => {
                return Err(CommandError::TooManyArguments(name.to_owned()));
            }
            Some(arg) => Some(arg.parse::<i64>().map_err(|_| bad_argument(name, arg))?),
        };
        return Ok(Some(Command::Event(InputEvent::OperationInvoked { op, amount })));
    }
    match name {
        "amount" => Ok(Some(Command::Event(InputEvent::ShiftAmountEdited {
            text: argument.unwrap_or_default().to_owned(),
        }))),
        "bit" => {
            let arg = required(name, argument, "a bit number")?;
            let index = arg.parse::<usize>().map_err(|_| bad_argument(name, arg))?;
            Ok(Some(Command::Event(InputEvent::BitToggled { index })))
        }
        "width" => {
            let arg = required(name, argument, "a number of bytes")?;
            let bytes = arg.parse::<u8>().map_err(|_| bad_argument(name, arg))?;
            Ok(Some(Command::Event(InputEvent::WidthSelected { bytes })))
        }
        "signed" => {
            let arg = required(name, argument, "'on' or 'off'")?;
            let signed = match arg {
                "on" | "true" | "yes" => true,
                "off" | "false" | "no" => false,
                _ => return Err(bad_argument(name, arg)),
            };
            Ok(Some(Command::Event(InputEvent::SignModeToggled { signed })))
        }
        "copy" => {
            let arg = required(name, argument, "a field name")?;
            let field = Base::try_from(arg).map_err(|_| bad_argument(name, arg))?;
            Ok(Some(Command::Copy(field)))
        }
        "show" => no_argument(Command::Show),
        "save" => no_argument(Command::Save),
        "help" | "?" => no_argument(Command::Help),
        "quit" | "exit" => no_argument(Command::Quit),
        _ => Err(CommandError::Unknown(name.to_owned())),
    }
}
