//! Staged, typewriter-style reveal of the hero lines.
//!
//! # Timeline
//!
//! ```text
//! stage 0   line 0 types ─────────► complete ── pause(0) ──┐
//! stage 1                             line 1 types ◄───────┘ ─► complete ── pause(1) ──┐
//! ...                                                                                  │
//! stage N   scroll prompt ◄────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stage `k < N` shows lines `0..=k`; stage `N` (the line count) is terminal
//! and shows the scroll prompt. The stage only grows, one step at a time,
//! and only after the current line has reported completion and its pause
//! has elapsed.

use crate::{
    clock::{Clock, ManualClock, Millis},
    timer::{TimerId, TimerQueue},
    typing::{Step, TypingState},
};

/// One line of the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevealLine {
    pub text: String,
    /// Delay between two revealed characters.
    pub char_delay_ms: Millis,
    /// Pause after the line completes, before the next stage.
    pub post_delay_ms: Millis,
}

impl RevealLine {
    pub fn new(text: impl Into<String>, char_delay_ms: Millis, post_delay_ms: Millis) -> Self {
        Self {
            text: text.into(),
            char_delay_ms,
            post_delay_ms,
        }
    }
}

/// Something observable that happened during [`RevealEngine::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealEvent {
    /// The line was fully revealed. Reported once per text.
    LineCompleted(usize),
    /// The stage counter moved to the given value.
    StageAdvanced(usize),
    /// The terminal stage was reached.
    PromptRevealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Type(usize),
    Advance(usize),
}

#[derive(Debug)]
struct LineSlot {
    config: RevealLine,
    typing: TypingState,
    timer: Option<TimerId>,
    started_at: Option<Millis>,
    completed_at: Option<Millis>,
}

/// The reveal engine of one mounted hero section.
#[derive(Debug)]
pub struct RevealEngine {
    lines: Vec<LineSlot>,
    stage: usize,
    timers: TimerQueue<Action>,
    pending_advance: Option<TimerId>,
    prompt_at: Option<Millis>,
    mounted: bool,
}

impl RevealEngine {
    /// Mount the engine at `now`; the first line starts typing immediately.
    pub fn mount(lines: Vec<RevealLine>, now: Millis) -> Self {
        let lines = lines
            .into_iter()
            .map(|config| LineSlot {
                typing: TypingState::new(config.text.clone()),
                config,
                timer: None,
                started_at: None,
                completed_at: None,
            })
            .collect::<Vec<_>>();

        let mut engine = Self {
            lines,
            stage: 0,
            timers: TimerQueue::new(),
            pending_advance: None,
            prompt_at: None,
            mounted: true,
        };

        if engine.lines.is_empty() {
            engine.prompt_at = Some(now);
        } else {
            engine.start_line(0, now);
        }
        engine
    }

    /// Process every timer due at or before `now`.
    pub fn advance(&mut self, now: Millis) -> Vec<RevealEvent> {
        let mut events = Vec::new();
        if !self.mounted {
            return events;
        }

        while let Some(fired) = self.timers.pop_due(now) {
            match fired.action {
                Action::Type(index) => self.type_char(index, fired.at, &mut events),
                Action::Advance(stage) => self.enter_stage(stage, fired.at, &mut events),
            }
        }
        events
    }

    /// [`advance`](Self::advance) using a clock reading.
    pub fn poll(&mut self, clock: &impl Clock) -> Vec<RevealEvent> {
        self.advance(clock.now_ms())
    }

    /// Replace the text of a line.
    ///
    /// Progress resets to empty. If the line is already on screen its
    /// character timer restarts at `now`; if it is the current line, a
    /// pending stage advance is cancelled so the next line waits for the
    /// new text to finish.
    pub fn set_line_text(&mut self, index: usize, text: impl Into<String>, now: Millis) -> bool {
        let Some(slot) = self.lines.get_mut(index) else {
            return false;
        };
        let text = text.into();
        if !slot.typing.set_text(text.clone()) {
            return false;
        }
        slot.config.text = text;
        slot.completed_at = None;
        if let Some(id) = slot.timer.take() {
            self.timers.cancel(id);
        }

        if index == self.stage
            && let Some(id) = self.pending_advance.take()
        {
            self.timers.cancel(id);
        }

        if self.mounted && self.is_visible(index) {
            self.start_line(index, now);
        }
        true
    }

    /// Cancel every timer. Later calls to `advance` do nothing.
    pub fn unmount(&mut self) {
        self.timers.clear();
        self.pending_advance = None;
        for slot in &mut self.lines {
            slot.timer = None;
        }
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The stage counter has passed the last line.
    pub fn is_terminal(&self) -> bool {
        self.stage >= self.lines.len()
    }

    pub fn prompt_visible(&self) -> bool {
        self.is_terminal()
    }

    /// Number of lines currently on screen.
    pub fn visible_count(&self) -> usize {
        (self.stage + 1).min(self.lines.len())
    }

    pub fn is_visible(&self, index: usize) -> bool {
        index < self.visible_count()
    }

    /// Revealed text of every visible line, in order.
    pub fn visible_lines(&self) -> impl Iterator<Item = &str> {
        self.lines[..self.visible_count()]
            .iter()
            .map(|slot| slot.typing.revealed())
    }

    pub fn line(&self, index: usize) -> Option<&TypingState> {
        self.lines.get(index).map(|slot| &slot.typing)
    }

    /// Whether the cursor of a visible line is showing at `now`.
    pub fn cursor_visible(&self, index: usize, now: Millis, keep_after_complete: bool) -> bool {
        let Some(slot) = self.lines.get(index) else {
            return false;
        };
        match slot.started_at {
            Some(start) if self.is_visible(index) => slot
                .typing
                .cursor_visible(now.saturating_sub(start), keep_after_complete),
            _ => false,
        }
    }

    /// Earliest time at which `advance` has work to do.
    pub fn next_due(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    fn start_line(&mut self, index: usize, at: Millis) {
        let slot = &mut self.lines[index];
        slot.started_at = Some(at);
        // Empty text still goes through the queue so completion is
        // reported by the next `advance`, like any other line.
        let id = if slot.typing.is_empty() {
            self.timers.after(at, 0, Action::Type(index))
        } else {
            self.timers
                .every(at, slot.config.char_delay_ms, Action::Type(index))
        };
        slot.timer = Some(id);
    }

    fn type_char(&mut self, index: usize, at: Millis, events: &mut Vec<RevealEvent>) {
        let slot = &mut self.lines[index];
        match slot.typing.tick() {
            Step::Typed => {}
            Step::Completed => {
                if let Some(id) = slot.timer.take() {
                    self.timers.cancel(id);
                }
                slot.completed_at = Some(at);
                events.push(RevealEvent::LineCompleted(index));

                if index == self.stage && self.pending_advance.is_none() {
                    let pause = slot.config.post_delay_ms;
                    self.pending_advance =
                        Some(self.timers.after(at, pause, Action::Advance(index + 1)));
                }
            }
            Step::Idle => {
                if let Some(id) = slot.timer.take() {
                    self.timers.cancel(id);
                }
            }
        }
    }

    fn enter_stage(&mut self, stage: usize, at: Millis, events: &mut Vec<RevealEvent>) {
        self.pending_advance = None;
        if stage != self.stage + 1 {
            return;
        }
        self.stage = stage;
        events.push(RevealEvent::StageAdvanced(stage));

        if stage >= self.lines.len() {
            self.prompt_at = Some(at);
            events.push(RevealEvent::PromptRevealed);
        } else {
            self.start_line(stage, at);
        }
    }
}

// ============================================================================
// Precomputed Timeline
// ============================================================================

/// When one line starts and finishes, relative to mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTiming {
    pub start: Millis,
    pub complete: Millis,
}

/// Full schedule of an uninterrupted reveal, relative to mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    pub lines: Vec<LineTiming>,
    pub prompt: Millis,
}

impl Timeline {
    /// Run the engine on a manual clock until the prompt shows.
    pub fn compute(lines: &[RevealLine]) -> Self {
        let clock = ManualClock::new(0);
        let mut engine = RevealEngine::mount(lines.to_vec(), clock.now_ms());

        while !engine.is_terminal() {
            let Some(next) = engine.next_due() else { break };
            clock.set(next);
            engine.poll(&clock);
        }

        let lines = engine
            .lines
            .iter()
            .map(|slot| LineTiming {
                start: slot.started_at.unwrap_or(0),
                complete: slot.completed_at.unwrap_or(0),
            })
            .collect();

        Self {
            lines,
            prompt: engine.prompt_at.unwrap_or(0),
        }
    }
}
