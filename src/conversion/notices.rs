use std::mem::discriminant;

use crate::error::conversion::ConversionError;

/// Per-message accumulator for informational asides and reportable errors.
///
/// One value is threaded through a single message's token processing and
/// dropped afterwards; nothing here is shared across messages.
#[derive(Debug, Default)]
pub struct Notices {
    pub info: Vec<String>,
    pub errors: Vec<ConversionError>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_info(&mut self, message: impl Into<String>) {
        self.info.push(message.into());
    }

    pub fn push_error(&mut self, error: ConversionError) {
        self.errors.push(error);
    }

    /// Records an error unless one of the same variant was already recorded
    /// for this message. Used for conditions that would otherwise repeat
    /// per token, like the missing-timezone notice.
    pub fn push_error_once(&mut self, error: ConversionError) {
        if self
            .errors
            .iter()
            .any(|existing| discriminant(existing) == discriminant(&error))
        {
            return;
        }
        self.errors.push(error);
    }
}
