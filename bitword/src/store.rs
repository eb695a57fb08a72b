//! The value being inspected, together with its active width.

use super::width::{Width, MAX_BITS};

/// Owns the current value.  The value is always held masked to the
/// current width, so callers never see bits at or above the width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValueStore {
    value: u64,
    width: Width,
}

impl ValueStore {
    pub fn new(width: Width) -> ValueStore {
        ValueStore { value: 0, width }
    }

    pub fn width(&self) -> Width {
        self.width
    }

    /// Changes the width.  Bits at or above the new width are
    /// discarded, and are not restored if the width is later
    /// increased again.
    pub fn set_width(&mut self, width: Width) {
        self.width = width;
        self.value &= width.mask();
    }

    pub fn set_value(&mut self, value: u64) {
        self.value = value & self.width.mask();
    }

    pub fn get_masked(&self) -> u64 {
        self.value
    }

    /// Returns the state of bit `index`.  Inactive bits always
    /// read as clear.
    pub fn bit(&self, index: usize) -> bool {
        self.width.is_active(index) && (self.value >> index) & 1 != 0
    }

    /// Flips bit `index`.  Returns false (and does nothing) if the
    /// bit is not active.
    pub fn toggle_bit(&mut self, index: usize) -> bool {
        if index >= MAX_BITS || !self.width.is_active(index) {
            return false;
        }
        self.value ^= 1_u64 << index;
        true
    }
}
