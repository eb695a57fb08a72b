use std::io;

/// Somewhere the displayed text of a field can be copied to.  The
/// inspector only supplies the text; the system clipboard itself is
/// the implementor's business.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), io::Error>;
}

/// Keeps the most recently copied text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), io::Error> {
        self.contents = Some(text.to_owned());
        Ok(())
    }
}
