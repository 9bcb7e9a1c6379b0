//! The "copy my email" button.
//!
//! Copying goes through a [`Clipboard`]. If the write fails, the button falls
//! back to handing a `mailto:` URL to a [`MailComposer`]. A successful copy
//! shows a confirmation that clears itself after [`COPIED_RESET_MS`].

use crate::{
    clock::Millis,
    timer::{TimerId, TimerQueue},
};
use thiserror::Error;

/// How long the "copied" confirmation stays up.
pub const COPIED_RESET_MS: Millis = 2000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("no clipboard available")]
    Unavailable,

    #[error("clipboard write denied: {0}")]
    Denied(String),
}

/// Destination of the copied address.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Opens the user's mail client on a `mailto:` URL.
pub trait MailComposer {
    fn compose(&mut self, url: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// The clipboard failed; the mailer was handed this URL instead.
    MailFallback(String),
}

#[derive(Debug)]
pub struct CopyEmail {
    email: String,
    copied: bool,
    reset: Option<TimerId>,
    timers: TimerQueue<()>,
}

impl CopyEmail {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            copied: false,
            reset: None,
            timers: TimerQueue::new(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn mailto_url(&self) -> String {
        format!("mailto:{}", self.email)
    }

    pub fn copy(
        &mut self,
        clipboard: &mut impl Clipboard,
        mailer: &mut impl MailComposer,
        now: Millis,
    ) -> CopyOutcome {
        match clipboard.write_text(&self.email) {
            Ok(()) => {
                self.copied = true;
                if let Some(id) = self.reset.take() {
                    self.timers.cancel(id);
                }
                self.reset = Some(self.timers.after(now, COPIED_RESET_MS, ()));
                CopyOutcome::Copied
            }
            Err(_) => {
                let url = self.mailto_url();
                mailer.compose(&url);
                CopyOutcome::MailFallback(url)
            }
        }
    }

    /// Run due timers. Returns `true` when the confirmation was cleared.
    pub fn advance(&mut self, now: Millis) -> bool {
        let mut cleared = false;
        while self.timers.pop_due(now).is_some() {
            self.copied = false;
            self.reset = None;
            cleared = true;
        }
        cleared
    }

    pub fn is_copied(&self) -> bool {
        self.copied
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    pub fn unmount(&mut self) {
        self.timers.clear();
        self.reset = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemoryClipboard {
        contents: Option<String>,
        fail: bool,
    }

    impl Clipboard for MemoryClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Denied("not focused".into()));
            }
            self.contents = Some(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingMailer {
        opened: Vec<String>,
    }

    impl MailComposer for RecordingMailer {
        fn compose(&mut self, url: &str) {
            self.opened.push(url.to_string());
        }
    }

    #[test]
    fn test_copy_sets_flag_and_resets_after_two_seconds() {
        let mut button = CopyEmail::new("alex@chen.dev");
        let mut clipboard = MemoryClipboard::default();
        let mut mailer = RecordingMailer::default();

        assert_eq!(button.copy(&mut clipboard, &mut mailer, 0), CopyOutcome::Copied);
        assert_eq!(clipboard.contents.as_deref(), Some("alex@chen.dev"));
        assert!(button.is_copied());
        assert!(mailer.opened.is_empty());

        assert!(!button.advance(1_999));
        assert!(button.is_copied());
        assert!(button.advance(2_000));
        assert!(!button.is_copied());
    }

    #[test]
    fn test_failed_write_falls_back_to_mailto() {
        let mut button = CopyEmail::new("alex@chen.dev");
        let mut clipboard = MemoryClipboard {
            fail: true,
            ..Default::default()
        };
        let mut mailer = RecordingMailer::default();

        let outcome = button.copy(&mut clipboard, &mut mailer, 0);
        assert_eq!(outcome, CopyOutcome::MailFallback("mailto:alex@chen.dev".into()));
        assert_eq!(mailer.opened, ["mailto:alex@chen.dev"]);
        assert!(!button.is_copied());
        assert!(button.next_due().is_none());
    }

    #[test]
    fn test_recopy_restarts_reset() {
        let mut button = CopyEmail::new("a@b.c");
        let mut clipboard = MemoryClipboard::default();
        let mut mailer = RecordingMailer::default();

        button.copy(&mut clipboard, &mut mailer, 0);
        button.copy(&mut clipboard, &mut mailer, 1_500);
        assert!(!button.advance(2_000));
        assert!(button.is_copied());
        assert!(button.advance(3_500));
        assert!(!button.is_copied());
    }

    #[test]
    fn test_unmount_cancels_reset() {
        let mut button = CopyEmail::new("a@b.c");
        button.copy(&mut MemoryClipboard::default(), &mut RecordingMailer::default(), 0);
        button.unmount();
        assert!(!button.advance(10_000));
    }
}
