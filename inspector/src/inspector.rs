//! The stateful part of the bit inspector.
//!
//! Every change goes through [`Inspector::dispatch`]: the event is
//! validated, a new value is computed (by parsing text or by
//! applying an operation), the value is stored, and then every
//! representation is regenerated and pushed out to the [`View`].
use std::io;

use conv::ValueFrom;
use serde::Serialize;
use tracing::{event, Level};

use bitword::prelude::*;
use bitword::{codec, validate, MAX_BITS};

use super::clipboard::Clipboard;
use super::event::{EventOutcome, InputEvent, Rejection};
use super::latch::Latch;
use super::settings::Settings;
use super::view::View;

/// The text currently shown in each representation field.  This is
/// usually the formatted value, but the field the user is typing in
/// keeps exactly what they typed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DisplayStrings {
    pub hex: String,
    pub dec: String,
    pub oct: String,
    pub bin: String,
}

impl DisplayStrings {
    pub fn text(&self, field: Base) -> &str {
        match field {
            Base::Hex => &self.hex,
            Base::Dec => &self.dec,
            Base::Oct => &self.oct,
            Base::Bin => &self.bin,
        }
    }

    fn set(&mut self, field: Base, text: String) {
        match field {
            Base::Hex => self.hex = text,
            Base::Dec => self.dec = text,
            Base::Oct => self.oct = text,
            Base::Bin => self.bin = text,
        }
    }
}

fn saturating_amount(digits: &str) -> u32 {
    // The caller has checked that these are all decimal digits, so
    // the only way for parsing to fail is overflow.
    match digits.parse::<u64>() {
        Ok(n) => u32::value_from(n).unwrap_or(u32::MAX),
        Err(_) => u32::MAX,
    }
}

#[derive(Debug)]
pub struct Inspector {
    store: ValueStore,
    sign_mode: SignMode,
    shift_amount: u32,
    shift_text: String,
    fields: DisplayStrings,
    bits: [BitState; MAX_BITS],
    latch: Latch,
}

impl Default for Inspector {
    fn default() -> Inspector {
        Inspector::new(&Settings::default())
    }
}

impl Inspector {
    /// Creates an inspector holding zero, configured from `settings`.
    pub fn new(settings: &Settings) -> Inspector {
        let store = ValueStore::new(settings.width());
        let sign_mode = SignMode::from(settings.signed_mode);
        let reps = codec::format(store.get_masked(), store.width(), sign_mode);
        Inspector {
            store,
            sign_mode,
            shift_amount: settings.shift_amount,
            shift_text: settings.shift_amount.to_string(),
            fields: DisplayStrings {
                hex: reps.hex,
                dec: reps.dec,
                oct: reps.oct,
                bin: reps.bin,
            },
            bits: reps.bits,
            latch: Latch::default(),
        }
    }

    pub fn value(&self) -> u64 {
        self.store.get_masked()
    }

    pub fn width(&self) -> Width {
        self.store.width()
    }

    pub fn sign_mode(&self) -> SignMode {
        self.sign_mode
    }

    /// The amount used by shifts and rotations when none is given
    /// explicitly.
    pub fn shift_amount(&self) -> u32 {
        self.shift_amount
    }

    pub fn shift_amount_text(&self) -> &str {
        &self.shift_text
    }

    pub fn display_strings(&self) -> &DisplayStrings {
        &self.fields
    }

    pub fn bit_states(&self) -> &[BitState; MAX_BITS] {
        &self.bits
    }

    /// The current preferences, in the form in which they are saved.
    pub fn settings(&self) -> Settings {
        Settings {
            num_bytes: self.store.width().bytes(),
            signed_mode: self.sign_mode.is_signed(),
            shift_amount: self.shift_amount,
        }
    }

    /// Copies the text currently displayed in `field`.
    pub fn copy_field(&self, field: Base, clipboard: &mut dyn Clipboard) -> Result<(), io::Error> {
        let text = self.fields.text(field);
        event!(Level::DEBUG, "copying {field} field {text:?}");
        clipboard.set_text(text)
    }

    /// Pushes the complete state out to `view`.  Used when a view is
    /// first attached.
    pub fn refresh(&mut self, view: &mut dyn View) {
        self.propagate(None, view);
        let Some(_guard) = self.latch.try_acquire() else {
            return;
        };
        if let Some(echo) = view.show_amount(&self.shift_text) {
            let outcome = self.dispatch(echo, view);
            debug_assert_eq!(outcome, EventOutcome::Suppressed);
        }
    }

    /// Handles one input event.
    pub fn dispatch(&mut self, input: InputEvent, view: &mut dyn View) -> EventOutcome {
        if self.latch.is_held() {
            event!(
                Level::TRACE,
                "suppressing {input:?}, which arrived while updating the view"
            );
            return EventOutcome::Suppressed;
        }
        event!(Level::DEBUG, "dispatch: {input:?}");
        match input {
            InputEvent::TextEdited { field, text } => self.text_edited(field, text, view),
            InputEvent::ShiftAmountEdited { text } => self.amount_edited(text),
            InputEvent::BitToggled { index } => self.bit_toggled(index, view),
            InputEvent::WidthSelected { bytes } => self.width_selected(bytes, view),
            InputEvent::SignModeToggled { signed } => {
                self.sign_mode = SignMode::from(signed);
                self.propagate(None, view);
                EventOutcome::Applied
            }
            InputEvent::OperationInvoked { op, amount } => self.operation_invoked(op, amount, view),
        }
    }

    fn text_edited(&mut self, field: Base, text: String, view: &mut dyn View) -> EventOutcome {
        if !validate::is_acceptable(&text, field, self.sign_mode) {
            return EventOutcome::Rejected(Rejection::InvalidText { field, text });
        }
        if field == Base::Dec && text == "-" {
            // Negative number in progress.
            self.fields.set(field, text);
            return EventOutcome::Pending;
        }
        match codec::parse(&text, field, self.sign_mode, self.store.width()) {
            Ok(value) => {
                self.store.set_value(value);
                self.fields.set(field, text);
                self.propagate(Some(field), view);
                EventOutcome::Applied
            }
            Err(error) => {
                event!(
                    Level::WARN,
                    "dropping edit of {field} field to {text:?}: {error}"
                );
                EventOutcome::Rejected(Rejection::Unparseable { field, error })
            }
        }
    }

    fn amount_edited(&mut self, text: String) -> EventOutcome {
        if !validate::is_acceptable_amount(&text) {
            return EventOutcome::Rejected(Rejection::InvalidAmount(text));
        }
        if !text.is_empty() {
            self.shift_amount = saturating_amount(&text);
        }
        self.shift_text = text;
        EventOutcome::Applied
    }

    fn bit_toggled(&mut self, index: usize, view: &mut dyn View) -> EventOutcome {
        if index >= MAX_BITS {
            return EventOutcome::Rejected(Rejection::BitOutOfRange(index));
        }
        if !self.store.toggle_bit(index) {
            event!(
                Level::DEBUG,
                "bit {index} is not active at width {}",
                self.store.width()
            );
            return EventOutcome::Ignored;
        }
        self.propagate(None, view);
        EventOutcome::Applied
    }

    fn width_selected(&mut self, bytes: u8, view: &mut dyn View) -> EventOutcome {
        let width = match Width::try_from(bytes) {
            Ok(w) => w,
            Err(e) => {
                return EventOutcome::Rejected(Rejection::BadWidth(e));
            }
        };
        let before = self.store.get_masked();
        self.store.set_width(width);
        let after = self.store.get_masked();
        if before != after {
            event!(
                Level::INFO,
                "narrowing to {width} truncated {before:#X} to {after:#X}"
            );
        }
        self.propagate(None, view);
        EventOutcome::Applied
    }

    fn operation_invoked(
        &mut self,
        op: Operation,
        amount: Option<i64>,
        view: &mut dyn View,
    ) -> EventOutcome {
        let amount: u32 = match amount {
            None => self.shift_amount,
            Some(n) if n < 0 => {
                event!(Level::DEBUG, "ignoring {op} by negative amount {n}");
                return EventOutcome::Ignored;
            }
            Some(n) => u32::value_from(n).unwrap_or(u32::MAX),
        };
        let before = self.store.get_masked();
        let width = self.store.width();
        self.store.set_value(op.apply(before, width.bits(), amount));
        event!(
            Level::DEBUG,
            "{op} by {amount} at {width}: {before:#X} -> {:#X}",
            self.store.get_masked()
        );
        self.propagate(None, view);
        EventOutcome::Applied
    }

    /// Regenerates every representation from the stored value and
    /// pushes it to `view`.  The field named by `editing`, if any,
    /// keeps its current text.
    fn propagate(&mut self, editing: Option<Base>, view: &mut dyn View) {
        let Some(_guard) = self.latch.try_acquire() else {
            event!(Level::ERROR, "propagate called while already propagating");
            return;
        };
        let reps = codec::format(self.store.get_masked(), self.store.width(), self.sign_mode);
        let mut echoes: Vec<InputEvent> = Vec::new();
        for field in Base::ALL {
            if Some(field) == editing {
                continue;
            }
            let text = reps.text(field);
            echoes.extend(view.show_text(field, text));
            self.fields.set(field, text.to_owned());
        }
        for (index, state) in reps.bits.iter().enumerate() {
            echoes.extend(view.show_bit(index, *state));
        }
        self.bits = reps.bits;
        for echo in echoes {
            let outcome = self.dispatch(echo, view);
            debug_assert_eq!(outcome, EventOutcome::Suppressed);
        }
    }
}
