use crate::i18n::Labels;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// The sink was reached but did not take the text.
    #[error("Clipboard refused the text: {0}")]
    Refused(String),
    /// The sink could not be reached at all.
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Receives exported task text.
pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> Result<(), ExportError>;
}

/// Hands `text` to the sink and picks the status message to show.
pub fn export_to(sink: &mut dyn ClipboardSink, text: &str, labels: &'static Labels) -> &'static str {
    match sink.copy(text) {
        Ok(()) => labels.copied_message,
        Err(ExportError::Refused(reason)) => {
            log::info!("clipboard refused export: {}", reason);
            labels.copy_error
        }
        Err(e) => {
            log::error!("Error copying text: {}", e);
            labels.copy_generic_error
        }
    }
}

#[cfg(feature = "clipboard")]
pub struct SystemClipboard;

#[cfg(feature = "clipboard")]
impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ExportError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ExportError::Unavailable(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ExportError::Refused(e.to_string()))
    }
}

/// Fallback used when the crate is built without clipboard support.
#[cfg(not(feature = "clipboard"))]
pub struct SystemClipboard;

#[cfg(not(feature = "clipboard"))]
impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, _text: &str) -> Result<(), ExportError> {
        Err(ExportError::Unavailable(
            "built without clipboard support".to_string(),
        ))
    }
}

/// Keeps the last copied text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl ClipboardSink for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ExportError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
