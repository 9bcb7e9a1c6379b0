//! Mount/unmount lifecycle of the navigation panel.
//!
//! ```text
//!            open()             entry frame            close()
//!   Closed ─────────► Opening ─────────────► Open ─────────────► Closing
//!     ▲                  │                                          │
//!     │                  └────────────── close() ───────────────────┤
//!     │                                                             │
//!     └──────────────────────── transition_end() ◄──────────────────┘
//! ```
//!
//! The panel is mounted in every phase except `Closed`. Removal waits for
//! the exit transition to report that it finished, never for a timer.
//! The display clock ticks only in `Open`.

use super::{
    state::{PanelAction, PanelState},
    view::SortKey,
};
use crate::{
    clock::Millis,
    timer::{TimerId, TimerQueue},
};

/// Delay before the entry transition starts, letting the mounted panel
/// render once in its hidden style.
pub const DEFAULT_ENTRY_DELAY_MS: Millis = 10;

/// Period of the local-time display.
pub const DEFAULT_CLOCK_INTERVAL_MS: Millis = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Entry transition started; the panel is fully interactive.
    Opened,
    /// The displayed time changed.
    ClockTick(Millis),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelTimings {
    pub entry_delay_ms: Millis,
    pub clock_interval_ms: Millis,
}

impl Default for PanelTimings {
    fn default() -> Self {
        Self {
            entry_delay_ms: DEFAULT_ENTRY_DELAY_MS,
            clock_interval_ms: DEFAULT_CLOCK_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tick {
    Enter,
    Clock,
}

#[derive(Debug)]
pub struct PanelLifecycle {
    phase: Phase,
    timings: PanelTimings,
    default_sort: SortKey,
    timers: TimerQueue<Tick>,
    entry: Option<TimerId>,
    clock: Option<TimerId>,
    current_time: Option<Millis>,
    state: Option<PanelState>,
}

impl Default for PanelLifecycle {
    fn default() -> Self {
        Self::new(PanelTimings::default(), SortKey::default())
    }
}

impl PanelLifecycle {
    pub fn new(timings: PanelTimings, default_sort: SortKey) -> Self {
        Self {
            phase: Phase::Closed,
            timings,
            default_sort,
            timers: TimerQueue::new(),
            entry: None,
            clock: None,
            current_time: None,
            state: None,
        }
    }

    /// Mount the panel. Ignored unless closed: the launcher is disabled
    /// while the panel is mounted.
    pub fn open(&mut self, now: Millis) -> bool {
        if self.phase != Phase::Closed {
            return false;
        }
        self.phase = Phase::Opening;
        self.state = Some(PanelState::with_default_sort(self.default_sort));
        self.current_time = Some(now);
        self.entry = Some(self.timers.after(now, self.timings.entry_delay_ms, Tick::Enter));
        true
    }

    /// Start the exit transition. The clock stops immediately.
    pub fn close(&mut self) -> bool {
        if !matches!(self.phase, Phase::Opening | Phase::Open) {
            return false;
        }
        self.phase = Phase::Closing;
        self.timers.clear();
        self.entry = None;
        self.clock = None;
        true
    }

    /// The visual transition finished. Unmounts when closing.
    pub fn transition_end(&mut self) -> bool {
        if self.phase != Phase::Closing {
            return false;
        }
        self.phase = Phase::Closed;
        self.state = None;
        self.current_time = None;
        true
    }

    pub fn advance(&mut self, now: Millis) -> Vec<LifecycleEvent> {
        let mut events = Vec::new();
        while let Some(fired) = self.timers.pop_due(now) {
            match fired.action {
                Tick::Enter => {
                    self.entry = None;
                    self.phase = Phase::Open;
                    self.clock = Some(self.timers.every(
                        fired.at,
                        self.timings.clock_interval_ms,
                        Tick::Clock,
                    ));
                    self.current_time = Some(fired.at);
                    events.push(LifecycleEvent::Opened);
                }
                Tick::Clock => {
                    self.current_time = Some(fired.at);
                    events.push(LifecycleEvent::ClockTick(fired.at));
                }
            }
        }
        events
    }

    /// Apply a panel action. Ignored while unmounted.
    pub fn dispatch(&mut self, action: PanelAction) -> bool {
        match self.state.as_mut() {
            Some(state) => {
                *state = state.reduce(action);
                true
            }
            None => false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_mounted(&self) -> bool {
        self.phase != Phase::Closed
    }

    /// Whether the panel is drawn in its open style.
    pub fn is_shown(&self) -> bool {
        self.phase == Phase::Open
    }

    pub fn launcher_enabled(&self) -> bool {
        !self.is_mounted()
    }

    pub fn clock_running(&self) -> bool {
        self.clock.is_some_and(|id| self.timers.is_pending(id))
    }

    /// Last sampled time for the local-time display.
    pub fn current_time(&self) -> Option<Millis> {
        self.current_time
    }

    pub fn state(&self) -> Option<&PanelState> {
        self.state.as_ref()
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.timers.next_due()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::state::Section;

    #[test]
    fn test_full_cycle() {
        let mut panel = PanelLifecycle::default();
        assert!(panel.launcher_enabled());

        assert!(panel.open(0));
        assert_eq!(panel.phase(), Phase::Opening);
        assert!(panel.is_mounted());
        assert!(!panel.launcher_enabled());

        assert_eq!(panel.advance(10), vec![LifecycleEvent::Opened]);
        assert_eq!(panel.phase(), Phase::Open);
        assert!(panel.clock_running());

        assert!(panel.close());
        assert_eq!(panel.phase(), Phase::Closing);
        assert!(panel.is_mounted());
        assert!(!panel.clock_running());

        assert!(panel.transition_end());
        assert_eq!(panel.phase(), Phase::Closed);
        assert!(panel.state().is_none());
    }

    #[test]
    fn test_clock_ticks_every_second_while_open() {
        let mut panel = PanelLifecycle::default();
        panel.open(0);
        panel.advance(10);
        let events = panel.advance(3_010);
        assert_eq!(
            events,
            vec![
                LifecycleEvent::ClockTick(1_010),
                LifecycleEvent::ClockTick(2_010),
                LifecycleEvent::ClockTick(3_010),
            ]
        );
        assert_eq!(panel.current_time(), Some(3_010));
    }

    #[test]
    fn test_clock_stops_when_closing() {
        let mut panel = PanelLifecycle::default();
        panel.open(0);
        panel.advance(10);
        panel.close();
        assert!(panel.advance(60_000).is_empty());
    }

    #[test]
    fn test_close_before_open_transition_still_unmounts() {
        let mut panel = PanelLifecycle::default();
        panel.open(0);
        assert!(panel.close());
        // The pending entry frame must not reopen the panel.
        assert!(panel.advance(100).is_empty());
        assert_eq!(panel.phase(), Phase::Closing);
        assert!(panel.transition_end());
        assert!(!panel.is_mounted());
        assert!(panel.next_due().is_none());
    }

    #[test]
    fn test_transition_end_ignored_unless_closing() {
        let mut panel = PanelLifecycle::default();
        assert!(!panel.transition_end());
        panel.open(0);
        assert!(!panel.transition_end());
        panel.advance(10);
        assert!(!panel.transition_end());
        assert_eq!(panel.phase(), Phase::Open);
    }

    #[test]
    fn test_open_ignored_while_mounted() {
        let mut panel = PanelLifecycle::default();
        panel.open(0);
        assert!(!panel.open(5));
        panel.close();
        assert!(!panel.open(6));
        assert!(!panel.close());
    }

    #[test]
    fn test_state_resets_on_remount() {
        let mut panel = PanelLifecycle::default();
        panel.open(0);
        assert!(panel.dispatch(PanelAction::ToggleSection(Section::Reading)));
        assert!(
            panel
                .state()
                .is_some_and(|s| s.is_section_expanded(Section::Reading))
        );
        panel.close();
        panel.transition_end();
        assert!(!panel.dispatch(PanelAction::ToggleSection(Section::Reading)));

        panel.open(100);
        assert!(
            panel
                .state()
                .is_some_and(|s| !s.is_section_expanded(Section::Reading))
        );
    }

    #[test]
    fn test_default_sort_applies_on_mount() {
        let mut panel = PanelLifecycle::new(PanelTimings::default(), SortKey::Category);
        panel.open(0);
        assert_eq!(panel.state().map(|s| s.query().sort), Some(SortKey::Category));
    }
}
