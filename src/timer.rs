use std::time::{Duration, Instant};

use crate::event::StepDirection;

/// The default delay between auto-repeat steps while a button is held.
pub const DEFAULT_REPEAT_INTERVAL: Duration = Duration::from_millis(125);

/// A cancellable periodic tick source driving button auto-repeat.
///
/// The timer is poll-driven: the host's event loop calls
/// [`RepeatTimer::poll`] on the thread that owns the control, and ticks are
/// computed on the spot from the armed deadline. Cancelling clears the
/// deadline, so once [`RepeatTimer::cancel`] returns no tick can be
/// observed — there is no queued tick object left to deliver.
///
/// `start` schedules the first poll-visible tick one period out; the
/// immediate step at long-press begin is applied by the gesture
/// controller, never by the timer.
#[derive(Debug)]
pub struct RepeatTimer {
    interval: Duration,
    active: Option<ActiveRepeat>,
}

#[derive(Debug, Clone, Copy)]
struct ActiveRepeat {
    direction: StepDirection,
    next_tick_at: Instant,
}

impl RepeatTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            active: None,
        }
    }

    /// Arm the timer.
    ///
    /// Only one repeat may be active at a time: returns `false` (changing
    /// nothing) if the timer is already running.
    pub fn start(&mut self, direction: StepDirection, now: Instant) -> bool {
        if self.active.is_some() {
            return false;
        }

        self.active = Some(ActiveRepeat {
            direction,
            next_tick_at: now + self.interval,
        });
        true
    }

    /// Disarm the timer. Every subsequent poll yields nothing.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn direction(&self) -> Option<StepDirection> {
        self.active.map(|a| a.direction)
    }

    /// Yield the next due tick, advancing the deadline by one period.
    ///
    /// Call in a loop: after a stalled host loop each elapsed period
    /// yields one tick, so the control catches up to where a live timer
    /// would have taken it.
    pub fn poll(&mut self, now: Instant) -> Option<StepDirection> {
        let repeat = self.active.as_mut()?;
        if now < repeat.next_tick_at {
            return None;
        }

        repeat.next_tick_at += self.interval;
        Some(repeat.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(125);

    #[test]
    fn test_first_tick_lands_one_period_out() {
        let t0 = Instant::now();
        let mut timer = RepeatTimer::new(INTERVAL);

        assert!(timer.start(StepDirection::Increment, t0));
        assert_eq!(timer.poll(t0), None);
        assert_eq!(timer.poll(t0 + INTERVAL), Some(StepDirection::Increment));
        assert_eq!(timer.poll(t0 + INTERVAL), None);
    }

    #[test]
    fn test_start_while_active_is_a_no_op() {
        let t0 = Instant::now();
        let mut timer = RepeatTimer::new(INTERVAL);

        assert!(timer.start(StepDirection::Increment, t0));
        assert!(!timer.start(StepDirection::Decrement, t0));
        assert_eq!(timer.direction(), Some(StepDirection::Increment));
    }

    #[test]
    fn test_cancel_stops_all_ticks() {
        let t0 = Instant::now();
        let mut timer = RepeatTimer::new(INTERVAL);

        timer.start(StepDirection::Decrement, t0);
        timer.cancel();

        assert!(!timer.is_active());
        assert_eq!(timer.poll(t0 + INTERVAL * 10), None);
    }

    #[test]
    fn test_poll_catches_up_after_a_stall() {
        let t0 = Instant::now();
        let mut timer = RepeatTimer::new(INTERVAL);
        timer.start(StepDirection::Increment, t0);

        let now = t0 + INTERVAL * 3;
        let mut ticks = 0;
        while timer.poll(now).is_some() {
            ticks += 1;
        }
        assert_eq!(ticks, 3);

        // The deadline kept advancing; the next period yields exactly one.
        assert_eq!(timer.poll(now + INTERVAL), Some(StepDirection::Increment));
        assert_eq!(timer.poll(now + INTERVAL), None);
    }
}
