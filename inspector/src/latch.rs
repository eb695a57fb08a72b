//! A latch which is held while the inspector pushes a new value out
//! to the view.  Toolkits commonly report programmatic changes to a
//! widget in the same way as changes made by the user, so the
//! inspector would otherwise react to its own updates.
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct Latch {
    held: Rc<Cell<bool>>,
}

impl Latch {
    pub fn is_held(&self) -> bool {
        self.held.get()
    }

    /// Acquires the latch, returning `None` if it is already held.
    /// The latch is released when the returned guard is dropped.
    #[must_use]
    pub fn try_acquire(&self) -> Option<LatchGuard> {
        if self.held.replace(true) {
            None
        } else {
            Some(LatchGuard {
                held: Rc::clone(&self.held),
            })
        }
    }
}

#[derive(Debug)]
pub struct LatchGuard {
    held: Rc<Cell<bool>>,
}

impl Drop for LatchGuard {
    fn drop(&mut self) {
        self.held.set(false);
    }
}
