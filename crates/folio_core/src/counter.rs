//! Count-up numbers on the showcase cards.
//!
//! A counter sits at zero until its element is at least half visible, then
//! counts linearly to its target. Only the first qualifying visibility
//! notification matters: the counter unsubscribes as soon as it starts.

use crate::clock::Millis;

/// Minimum intersection ratio that starts the count.
pub const VISIBILITY_THRESHOLD: f64 = 0.5;

pub const DEFAULT_DURATION_MS: Millis = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimatedCounter {
    target: u64,
    duration_ms: Millis,
    started_at: Option<Millis>,
    subscribed: bool,
}

impl AnimatedCounter {
    /// Mount a counter and subscribe it to visibility notifications.
    pub fn mount(target: u64) -> Self {
        Self::with_duration(target, DEFAULT_DURATION_MS)
    }

    pub fn with_duration(target: u64, duration_ms: Millis) -> Self {
        Self {
            target,
            duration_ms,
            started_at: None,
            subscribed: true,
        }
    }

    /// Deliver one visibility notification. Returns `true` if this one
    /// started the count.
    pub fn on_visibility(&mut self, ratio: f64, now: Millis) -> bool {
        if !self.subscribed || ratio < VISIBILITY_THRESHOLD {
            return false;
        }
        self.subscribed = false;
        self.started_at = Some(now);
        true
    }

    /// Displayed value: `floor(progress * target)`, never above the target.
    pub fn value_at(&self, now: Millis) -> u64 {
        let Some(start) = self.started_at else {
            return 0;
        };
        let elapsed = now.saturating_sub(start);
        if elapsed >= self.duration_ms {
            return self.target;
        }
        // u128 keeps `target * elapsed` from overflowing.
        (u128::from(self.target) * u128::from(elapsed) / u128::from(self.duration_ms)) as u64
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_finished(&self, now: Millis) -> bool {
        self.started_at
            .is_some_and(|start| now.saturating_sub(start) >= self.duration_ms)
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn unmount(&mut self) {
        self.subscribed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stays_at_zero_until_visible() {
        let mut counter = AnimatedCounter::mount(1000);
        assert_eq!(counter.value_at(5_000), 0);
        assert!(!counter.on_visibility(0.2, 5_000));
        assert_eq!(counter.value_at(9_000), 0);
        assert!(counter.is_subscribed());
    }

    #[test]
    fn test_counts_linearly_after_threshold() {
        let mut counter = AnimatedCounter::mount(15_420);
        assert!(counter.on_visibility(0.5, 100));
        assert!(!counter.is_subscribed());
        assert_eq!(counter.value_at(100), 0);
        assert_eq!(counter.value_at(1_100), 7_710);
        assert_eq!(counter.value_at(1_101), 7_717);
        assert!(!counter.is_finished(2_099));
        assert_eq!(counter.value_at(2_100), 15_420);
        assert_eq!(counter.value_at(99_000), 15_420);
        assert!(counter.is_finished(2_100));
    }

    #[test]
    fn test_later_notifications_do_not_restart() {
        let mut counter = AnimatedCounter::mount(10);
        counter.on_visibility(1.0, 0);
        assert!(!counter.on_visibility(1.0, 1_000));
        assert_eq!(counter.value_at(2_000), 10);
    }

    #[test]
    fn test_unmount_before_visible_never_starts() {
        let mut counter = AnimatedCounter::mount(10);
        counter.unmount();
        assert!(!counter.on_visibility(1.0, 0));
        assert!(!counter.is_started());
    }

    #[test]
    fn test_zero_target() {
        let mut counter = AnimatedCounter::mount(0);
        counter.on_visibility(0.9, 0);
        assert_eq!(counter.value_at(1_000), 0);
    }
}
