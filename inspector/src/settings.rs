//! The user's preferences, which persist between sessions.
//!
//! Settings are stored as a flat JSON object:
//!
//! ```json
//! { "num_bytes": 4, "signed_mode": false, "shift_amount": 1 }
//! ```
//!
//! Loading never fails.  A missing or unreadable file yields the
//! defaults, and so does a file which cannot be decoded.  A field
//! which decodes but is out of range is replaced by its default
//! without affecting the other fields.
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io;
use std::path::Path;

use conv::ValueFrom;
use serde::{Deserialize, Serialize};
use tracing::{event, Level};

use bitword::Width;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Word width in bytes, 1 to 8.  Defaults to 4.
    pub num_bytes: u8,
    /// Whether decimal is shown as signed.  Defaults to false.
    pub signed_mode: bool,
    /// The shift/rotate amount.  Defaults to 1.
    pub shift_amount: u32,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            num_bytes: 4,
            signed_mode: false,
            shift_amount: 1,
        }
    }
}

/// The settings as found in the file, before validation.
#[derive(Debug, Default, Deserialize)]
struct StoredSettings {
    num_bytes: Option<i64>,
    signed_mode: Option<bool>,
    shift_amount: Option<i64>,
}

impl StoredSettings {
    fn validate(self) -> Settings {
        let defaults = Settings::default();
        let num_bytes = match self.num_bytes {
            None => defaults.num_bytes,
            Some(n) => match u8::value_from(n).ok().and_then(|b| Width::try_from(b).ok()) {
                Some(width) => width.bytes(),
                None => {
                    event!(
                        Level::WARN,
                        "ignoring out-of-range num_bytes setting {n}, using {}",
                        defaults.num_bytes
                    );
                    defaults.num_bytes
                }
            },
        };
        let shift_amount = match self.shift_amount {
            None => defaults.shift_amount,
            Some(n) if n < 0 => {
                event!(
                    Level::WARN,
                    "ignoring negative shift_amount setting {n}, using {}",
                    defaults.shift_amount
                );
                defaults.shift_amount
            }
            Some(n) => u32::value_from(n).unwrap_or(u32::MAX),
        };
        Settings {
            num_bytes,
            signed_mode: self.signed_mode.unwrap_or(defaults.signed_mode),
            shift_amount,
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Format(serde_json::Error),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            SettingsError::Io(e) => write!(f, "I/O error: {e}"),
            SettingsError::Format(e) => write!(f, "bad settings data: {e}"),
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Format(e) => Some(e),
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> SettingsError {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> SettingsError {
        SettingsError::Format(e)
    }
}

impl Settings {
    /// Decodes and validates settings.
    pub fn from_json(text: &str) -> Result<Settings, SettingsError> {
        let stored: StoredSettings = serde_json::from_str(text)?;
        Ok(stored.validate())
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Settings {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                event!(
                    Level::INFO,
                    "no settings file at {}, using defaults",
                    path.display()
                );
                return Settings::default();
            }
            Err(e) => {
                event!(
                    Level::WARN,
                    "failed to read settings from {}, using defaults: {e}",
                    path.display()
                );
                return Settings::default();
            }
        };
        match Settings::from_json(&text) {
            Ok(settings) => {
                event!(
                    Level::DEBUG,
                    "loaded settings {settings:?} from {}",
                    path.display()
                );
                settings
            }
            Err(e) => {
                event!(
                    Level::WARN,
                    "settings file {} is not usable, using defaults: {e}",
                    path.display()
                );
                Settings::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let text = self.to_json()?;
        fs::write(path, text)?;
        event!(Level::DEBUG, "saved settings {self:?} to {}", path.display());
        Ok(())
    }

    pub fn width(&self) -> Width {
        Width::try_from(self.num_bytes).unwrap_or_default()
    }
}
