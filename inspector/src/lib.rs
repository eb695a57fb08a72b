//! The `inspector` crate holds the state of a bit inspector and the
//! single pipeline through which user actions change it.  It is
//! independent of any particular user interface; a front end
//! implements [`View`] (and, if it wants copying, [`Clipboard`]) and
//! feeds [`InputEvent`]s to [`Inspector::dispatch`].
#![deny(unsafe_code)]

mod clipboard;
mod event;
mod inspector;
mod latch;
mod settings;
mod view;

pub use clipboard::{Clipboard, MemoryClipboard};
pub use event::{EventOutcome, InputEvent, Rejection};
pub use inspector::{DisplayStrings, Inspector};
pub use latch::{Latch, LatchGuard};
pub use settings::{Settings, SettingsError};
pub use view::{Echo, NullView, View};
