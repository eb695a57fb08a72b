//! Draws the inspector on a terminal.
use std::io::Write;

use termcolor::{self, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::{event, Level};

use bitword::prelude::*;
use bitword::MAX_BITS;
use inspector::{Echo, Inspector, View};

fn get_colour_choice() -> termcolor::ColorChoice {
    if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shade {
    Label,
    Set,
    Clear,
    Inactive,
    Status,
}

fn colour_spec(shade: Shade) -> ColorSpec {
    let mut spec = ColorSpec::new();
    match shade {
        Shade::Label => {
            spec.set_bold(true);
        }
        Shade::Set => {
            spec.set_fg(Some(Color::Green)).set_bold(true);
        }
        Shade::Clear => (),
        Shade::Inactive => {
            spec.set_fg(Some(Color::Black)).set_intense(true);
        }
        Shade::Status => {
            spec.set_fg(Some(Color::Yellow));
        }
    }
    spec
}

/// A terminal has no widgets to update in place, so the individual
/// updates pushed by the inspector are not drawn.  Instead,
/// [`TerminalView::render`] redraws the whole panel from the
/// inspector's current state.
pub struct TerminalView {
    stream: StandardStream,
    pending_status: Vec<String>,
}

impl TerminalView {
    pub fn new() -> TerminalView {
        TerminalView {
            stream: StandardStream::stdout(get_colour_choice()),
            pending_status: Vec::new(),
        }
    }

    fn set_shade(&mut self, shade: Shade) {
        let spec = colour_spec(shade);
        if let Err(e) = self.stream.set_color(&spec) {
            event!(Level::ERROR, "Failed to select colour {:?}: {}", spec, e);
        }
    }

    fn write_shaded(&mut self, shade: Shade, text: &str) -> Result<(), std::io::Error> {
        self.set_shade(shade);
        let result = write!(self.stream, "{text}");
        self.stream.reset()?;
        result
    }

    /// Writes any status messages which have accumulated.
    pub fn flush_status(&mut self) -> Result<(), std::io::Error> {
        for message in std::mem::take(&mut self.pending_status) {
            self.write_shaded(Shade::Status, &message)?;
            writeln!(self.stream)?;
        }
        self.stream.flush()
    }

    /// Draws the text fields and the bit grid, most significant bit
    /// first, with a gap between bytes.
    pub fn render(&mut self, insp: &Inspector) -> Result<(), std::io::Error> {
        let strings = insp.display_strings();
        for field in Base::ALL {
            self.write_shaded(Shade::Label, &format!("{:>4} ", field.name()))?;
            writeln!(self.stream, "{}", strings.text(field))?;
        }
        self.write_shaded(Shade::Label, "bits ")?;
        let bits = insp.bit_states();
        for index in (0..MAX_BITS).rev() {
            let state = bits[index];
            let (shade, glyph) = match state {
                BitState { active: false, .. } => (Shade::Inactive, "."),
                BitState { set: true, .. } => (Shade::Set, "1"),
                BitState { set: false, .. } => (Shade::Clear, "0"),
            };
            self.write_shaded(shade, glyph)?;
            if index % 8 == 0 && index != 0 {
                write!(self.stream, " ")?;
            }
        }
        writeln!(self.stream)?;
        let signedness = if insp.sign_mode().is_signed() {
            "signed"
        } else {
            "unsigned"
        };
        let amount = match insp.shift_amount_text() {
            "" => format!("{} (field blank)", insp.shift_amount()),
            text => text.to_owned(),
        };
        writeln!(
            self.stream,
            "     {}, {signedness}, shift amount {amount}",
            insp.width()
        )?;
        self.flush_status()
    }
}

impl Default for TerminalView {
    fn default() -> TerminalView {
        TerminalView::new()
    }
}

impl View for TerminalView {
    fn show_text(&mut self, _field: Base, _text: &str) -> Echo {
        None
    }

    fn show_bit(&mut self, _index: usize, _state: BitState) -> Echo {
        None
    }

    fn show_status(&mut self, message: &str) {
        self.pending_status.push(message.to_owned());
    }
}

impl Drop for TerminalView {
    fn drop(&mut self) {
        if let Err(e) = self.stream.reset() {
            event!(Level::ERROR, "Failed to reset terminal: {}", e);
        }
    }
}
