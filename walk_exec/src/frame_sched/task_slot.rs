//! Single slot cancellable delayed task
//!
//! The frame scheduler never has more than one tick pending. A [`TaskSlot`]
//! holds that one tick: scheduling replaces it, cancelling drops it and the
//! owner polls the slot to find out when it is due.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::time::{Duration, Instant};

use log::warn;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

pub trait TaskSlot {
    /// Arm the slot to fire after `delay`, replacing any pending task.
    fn schedule(&mut self, delay: Duration);

    /// Drop the pending task, if any.
    fn cancel(&mut self);

    fn is_pending(&self) -> bool;

    /// Time left until the pending task is due, zero if it is overdue.
    fn time_until_due(&self) -> Option<Duration>;

    /// Returns true, and clears the slot, if the pending task is due.
    fn take_due(&mut self) -> bool;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Slot driven by a virtual clock, advanced explicitly.
#[derive(Debug, Default, Clone)]
pub struct VirtualSlot {
    now: Duration,
    due: Option<Duration>,
}

/// Slot driven by the monotonic system clock.
#[derive(Debug, Clone)]
pub struct RealTimeSlot {
    due: Option<Instant>,

    /// Lateness above which a fired task is reported as an overrun.
    overrun_limit: Duration,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl VirtualSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the virtual clock forward.
    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
    }

    pub fn now(&self) -> Duration {
        self.now
    }
}

impl TaskSlot for VirtualSlot {
    fn schedule(&mut self, delay: Duration) {
        self.due = Some(self.now + delay);
    }

    fn cancel(&mut self) {
        self.due = None;
    }

    fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    fn time_until_due(&self) -> Option<Duration> {
        self.due
            .map(|due| due.checked_sub(self.now).unwrap_or_default())
    }

    fn take_due(&mut self) -> bool {
        match self.due {
            Some(due) if due <= self.now => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

impl RealTimeSlot {
    pub fn new(overrun_limit: Duration) -> Self {
        Self {
            due: None,
            overrun_limit,
        }
    }
}

impl TaskSlot for RealTimeSlot {
    fn schedule(&mut self, delay: Duration) {
        self.due = Some(Instant::now() + delay);
    }

    fn cancel(&mut self) {
        self.due = None;
    }

    fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    fn time_until_due(&self) -> Option<Duration> {
        self.due
            .map(|due| due.saturating_duration_since(Instant::now()))
    }

    fn take_due(&mut self) -> bool {
        let due = match self.due {
            Some(due) => due,
            None => return false,
        };

        let now = Instant::now();
        if now < due {
            return false;
        }

        // Late ticks are not compensated, only reported
        let lateness = now - due;
        if lateness > self.overrun_limit {
            warn!(
                "Frame tick is {:.1} ms late",
                lateness.as_secs_f64() * 1000.0
            );
        }

        self.due = None;
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_virtual_slot() {
        let mut slot = VirtualSlot::new();
        assert!(!slot.is_pending());
        assert!(!slot.take_due());

        slot.schedule(Duration::from_millis(40));
        assert!(slot.is_pending());
        assert_eq!(slot.time_until_due(), Some(Duration::from_millis(40)));

        slot.advance(Duration::from_millis(39));
        assert!(!slot.take_due());

        slot.advance(Duration::from_millis(5));
        assert_eq!(slot.time_until_due(), Some(Duration::from_millis(0)));
        assert!(slot.take_due());
        assert!(!slot.is_pending());
        assert!(!slot.take_due());
    }

    #[test]
    fn test_reschedule_replaces() {
        let mut slot = VirtualSlot::new();

        slot.schedule(Duration::from_millis(10));
        slot.schedule(Duration::from_millis(50));
        slot.advance(Duration::from_millis(20));
        assert!(!slot.take_due());

        slot.cancel();
        slot.advance(Duration::from_millis(100));
        assert!(!slot.take_due());
    }

    #[test]
    fn test_real_time_slot() {
        let mut slot = RealTimeSlot::new(Duration::from_millis(100));

        slot.schedule(Duration::from_millis(0));
        assert!(slot.is_pending());
        assert!(slot.take_due());
        assert!(!slot.is_pending());

        slot.schedule(Duration::from_secs(60));
        assert!(!slot.take_due());
        assert!(slot.time_until_due().unwrap() > Duration::from_secs(59));
    }
}
