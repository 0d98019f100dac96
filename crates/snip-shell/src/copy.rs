//! Copy-to-clipboard feedback.
//!
//! A successful copy shows a "copied" acknowledgment for a fixed duration.
//! Every confirmation issues a new [`CopyTicket`]; the timer holding an older
//! ticket cannot revert a newer acknowledgment.

use std::collections::HashMap;
use std::time::Duration;

/// Default acknowledgment duration.
pub const DEFAULT_FEEDBACK: Duration = Duration::from_millis(1200);

/// Clipboard write failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard is not available")]
    Unavailable,
    #[error("Clipboard write rejected: {0}")]
    Rejected(String),
}

/// Destination for copied text.
pub trait Clipboard {
    /// Place `text` on the clipboard verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError`] if the platform refuses the write.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Handle for reverting one acknowledgment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CopyTicket(u64);

/// Acknowledgment state of one copy button.
#[derive(Clone, Debug)]
pub struct CopyFeedback {
    duration: Duration,
    copied: bool,
    latest: u64,
}

impl CopyFeedback {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            copied: false,
            latest: 0,
        }
    }

    /// Copy through a synchronous clipboard.
    ///
    /// # Errors
    ///
    /// Returns the clipboard error; the acknowledgment is not shown.
    pub fn copy<C>(&mut self, clipboard: &mut C, text: &str) -> Result<CopyTicket, ClipboardError>
    where
        C: Clipboard + ?Sized,
    {
        match clipboard.write_text(text) {
            Ok(()) => Ok(self.confirm()),
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// Show the acknowledgment after an asynchronous write resolved.
    pub fn confirm(&mut self) -> CopyTicket {
        self.latest += 1;
        self.copied = true;
        CopyTicket(self.latest)
    }

    /// Record a failed write. Hides any acknowledgment still showing.
    pub fn fail(&mut self, err: &ClipboardError) {
        tracing::warn!(error = %err, "Copy to clipboard failed");
        self.latest += 1;
        self.copied = false;
    }

    /// Timer callback. Reverts only if `ticket` is the latest one issued.
    pub fn revert(&mut self, ticket: CopyTicket) -> bool {
        if ticket.0 == self.latest && self.copied {
            self.copied = false;
            true
        } else {
            false
        }
    }

    pub fn is_copied(&self) -> bool {
        self.copied
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Default for CopyFeedback {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK)
    }
}

/// Feedback state for the copy buttons of the displayed page, keyed by button.
#[derive(Debug, Default)]
pub struct CopyRegistry {
    duration: Duration,
    buttons: HashMap<String, CopyFeedback>,
    next_key: u64,
}

impl CopyRegistry {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            buttons: HashMap::new(),
            next_key: 0,
        }
    }

    /// Fresh key for a button seen for the first time.
    pub fn assign_key(&mut self) -> String {
        let key = self.next_key.to_string();
        self.next_key += 1;
        key
    }

    /// Feedback for `key`, created on first use.
    pub fn feedback(&mut self, key: &str) -> &mut CopyFeedback {
        let duration = self.duration;
        self.buttons
            .entry(key.to_owned())
            .or_insert_with(|| CopyFeedback::new(duration))
    }

    /// Feedback for `key` if the button is still tracked.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut CopyFeedback> {
        self.buttons.get_mut(key)
    }

    /// Forget every button, e.g. after the content was replaced.
    ///
    /// Keys keep increasing, so timers from the old content find nothing.
    pub fn clear(&mut self) {
        self.buttons.clear();
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}
