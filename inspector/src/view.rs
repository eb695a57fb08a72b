//! The boundary between the inspector and whatever displays it.

use bitword::prelude::*;

use super::event::InputEvent;

/// A change notification raised by the view in response to the
/// inspector updating it.
pub type Echo = Option<InputEvent>;

/// Implemented by the presentation layer.  The inspector calls these
/// methods to push new text and bit states out to the widgets.
///
/// Many toolkits raise a "changed" notification when a widget is
/// updated programmatically.  A view which does this should return
/// that notification rather than delivering it itself; the inspector
/// routes it back through its own event pipeline, where it is
/// recognised and dropped.
pub trait View {
    fn show_text(&mut self, field: Base, text: &str) -> Echo;

    fn show_bit(&mut self, index: usize, state: BitState) -> Echo;

    fn show_amount(&mut self, _text: &str) -> Echo {
        None
    }

    /// Displays a non-fatal message (for example, a failure to save
    /// settings).
    fn show_status(&mut self, _message: &str) {}
}

/// A view which displays nothing.
#[derive(Debug, Default)]
pub struct NullView;

impl View for NullView {
    fn show_text(&mut self, _field: Base, _text: &str) -> Echo {
        None
    }

    fn show_bit(&mut self, _index: usize, _state: BitState) -> Echo {
        None
    }
}
