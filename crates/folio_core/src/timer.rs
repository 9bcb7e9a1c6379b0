//! Timer queue owned by a single component.
//!
//! Replaces ad-hoc nested timeouts with an explicit schedule:
//!
//! ```text
//!   after(now, 500, A) ──┐
//!   every(now, 60, B) ───┼──► [ (due, seq, action) ... ] ──► pop_due(now)
//!   cancel(id) ──────────┘                                    │
//!                                                             ▼
//!                                       Fired { at: due, action }  (intervals re-armed)
//! ```
//!
//! Entries fire in `(due, seq)` order. `Fired::at` is the *scheduled* time,
//! not the polling time, so a component that schedules follow-up timers
//! relative to `at` behaves the same whether it is polled every millisecond
//! or once after a long gap.

use crate::clock::Millis;

/// Handle returned by [`TimerQueue::after`] and [`TimerQueue::every`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// A timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<A> {
    pub id: TimerId,
    pub at: Millis,
    pub action: A,
}

#[derive(Debug)]
struct Entry<A> {
    id: TimerId,
    due: Millis,
    seq: u64,
    period: Option<Millis>,
    action: A,
}

/// One-shot and interval timers carrying an action value.
#[derive(Debug)]
pub struct TimerQueue<A> {
    entries: Vec<Entry<A>>,
    next_id: u64,
    next_seq: u64,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            next_seq: 0,
        }
    }
}

impl<A: Clone> TimerQueue<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `action` once, `delay` ms after `now`.
    pub fn after(&mut self, now: Millis, delay: Millis, action: A) -> TimerId {
        self.push(now.saturating_add(delay), None, action)
    }

    /// Fire `action` every `period` ms, first at `now + period`.
    ///
    /// A zero period is treated as 1 ms.
    pub fn every(&mut self, now: Millis, period: Millis, action: A) -> TimerId {
        let period = period.max(1);
        self.push(now.saturating_add(period), Some(period), action)
    }

    /// Cancel a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Time of the earliest pending timer.
    pub fn next_due(&self) -> Option<Millis> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Remove and return the earliest timer due at or before `now`.
    ///
    /// Interval timers are re-armed at `due + period` before returning.
    pub fn pop_due(&mut self, now: Millis) -> Option<Fired<A>> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| (e.due, e.seq))
            .map(|(i, _)| i)?;

        match self.entries[index].period {
            Some(period) => {
                let seq = self.bump_seq();
                let entry = &mut self.entries[index];
                let fired = Fired {
                    id: entry.id,
                    at: entry.due,
                    action: entry.action.clone(),
                };
                entry.due = entry.due.saturating_add(period);
                entry.seq = seq;
                Some(fired)
            }
            None => {
                let entry = self.entries.swap_remove(index);
                Some(Fired {
                    id: entry.id,
                    at: entry.due,
                    action: entry.action,
                })
            }
        }
    }

    fn push(&mut self, due: Millis, period: Option<Millis>, action: A) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();
        self.entries.push(Entry {
            id,
            due,
            seq,
            period,
            action,
        });
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}
