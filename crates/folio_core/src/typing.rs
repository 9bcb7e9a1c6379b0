//! Character-by-character reveal of a single line.

use crate::clock::Millis;

/// Half-period of the blinking cursor.
pub const CURSOR_BLINK_MS: Millis = 500;

/// Result of one [`TypingState::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One more character was revealed; the line is not finished.
    Typed,
    /// The line is now fully revealed. Returned once per text: by the tick
    /// that reveals the last character, or by the first tick on empty text.
    Completed,
    /// Nothing left to do.
    Idle,
}

/// Reveal progress of one line of text.
///
/// `revealed` counts chars, never bytes, and only grows by one per
/// [`tick`](Self::tick). [`set_text`](Self::set_text) is the only way back
/// to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingState {
    text: String,
    char_len: usize,
    revealed: usize,
    revealed_bytes: usize,
    completion_fired: bool,
}

impl TypingState {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            char_len: text.chars().count(),
            text,
            revealed: 0,
            revealed_bytes: 0,
            completion_fired: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The part of the text shown so far.
    pub fn revealed(&self) -> &str {
        &self.text[..self.revealed_bytes]
    }

    pub fn revealed_len(&self) -> usize {
        self.revealed
    }

    /// Length of the text in chars.
    pub fn len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    pub fn is_complete(&self) -> bool {
        self.revealed == self.char_len
    }

    /// Whether the completion of the current text has been reported.
    pub fn completion_fired(&self) -> bool {
        self.completion_fired
    }

    /// Reveal the next character.
    pub fn tick(&mut self) -> Step {
        if let Some(ch) = self.text[self.revealed_bytes..].chars().next() {
            self.revealed += 1;
            self.revealed_bytes += ch.len_utf8();
            if !self.is_complete() {
                return Step::Typed;
            }
        }

        if self.completion_fired {
            Step::Idle
        } else {
            self.completion_fired = true;
            Step::Completed
        }
    }

    /// Replace the text. Progress and the completion guard reset only when
    /// the text actually changes; returns whether it did.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }
        *self = Self::new(text);
        true
    }

    /// Cursor visibility `elapsed` ms after the line started typing.
    ///
    /// The cursor blinks while typing; once complete it is hidden unless
    /// `keep_after_complete` is set.
    pub fn cursor_visible(&self, elapsed: Millis, keep_after_complete: bool) -> bool {
        if self.is_complete() && !keep_after_complete {
            return false;
        }
        (elapsed / CURSOR_BLINK_MS) % 2 == 0
    }
}
