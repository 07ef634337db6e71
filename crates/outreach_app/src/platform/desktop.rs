use std::cell::RefCell;

use outreach_logging::outreach_debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DesktopError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("browser unavailable: {0}")]
    Browser(String),
}

/// The two places a draft leaves the panel: the clipboard and the browser.
pub trait Desktop {
    fn copy_text(&self, text: &str) -> Result<(), DesktopError>;
    fn open_url(&self, url: &str) -> Result<(), DesktopError>;
}

/// Real clipboard and default browser.
#[derive(Default)]
pub struct SystemDesktop {
    // Kept alive so X11/Wayland selections outlive the copy call.
    clipboard: RefCell<Option<arboard::Clipboard>>,
}

impl Desktop for SystemDesktop {
    fn copy_text(&self, text: &str) -> Result<(), DesktopError> {
        let mut slot = self.clipboard.borrow_mut();
        if slot.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|err| DesktopError::Clipboard(err.to_string()))?;
            *slot = Some(clipboard);
        }
        let Some(clipboard) = slot.as_mut() else {
            return Err(DesktopError::Clipboard("not initialised".into()));
        };
        clipboard
            .set_text(text.to_owned())
            .map_err(|err| DesktopError::Clipboard(err.to_string()))?;
        outreach_debug!("Copied {} chars to clipboard", text.chars().count());
        Ok(())
    }

    fn open_url(&self, url: &str) -> Result<(), DesktopError> {
        webbrowser::open(url).map_err(|err| DesktopError::Browser(err.to_string()))
    }
}
