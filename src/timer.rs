use std::time::{Duration, Instant};

/// One pending delayed step for a single control.
///
/// Scheduling a new step cancels whatever was pending, so a late timer from an
/// earlier transition can never fire after a newer one started. Steps are
/// polled from the event loop with [`Delayed::take_due`] instead of being
/// spawned.
#[derive(Debug)]
pub struct Delayed<T> {
    pending: Option<(Instant, T)>,
}

impl<T> Default for Delayed<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> Delayed<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `step` at `now + delay`. Returns the step it replaced, if any.
    pub fn schedule(&mut self, now: Instant, delay: Duration, step: T) -> Option<T> {
        self.pending
            .replace((now + delay, step))
            .map(|(_, replaced)| replaced)
    }

    /// Remove and return the pending step once its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((at, _)) if at <= now => self.pending.take().map(|(_, step)| step),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fires_only_after_deadline() {
        let t0 = Instant::now();
        let mut timer = Delayed::new();
        timer.schedule(t0, 200 * MS, "hide");

        assert_eq!(timer.take_due(t0 + 199 * MS), None);
        assert_eq!(timer.take_due(t0 + 200 * MS), Some("hide"));
        assert_eq!(timer.take_due(t0 + 500 * MS), None);
    }

    #[test]
    fn test_reschedule_cancels_previous_step() {
        let t0 = Instant::now();
        let mut timer = Delayed::new();
        timer.schedule(t0, 200 * MS, "hide");
        let replaced = timer.schedule(t0 + 10 * MS, 50 * MS, "focus");

        assert_eq!(replaced, Some("hide"));
        assert_eq!(timer.take_due(t0 + 60 * MS), Some("focus"));
        // the replaced hide never fires
        assert_eq!(timer.take_due(t0 + 1000 * MS), None);
    }

    #[test]
    fn test_empty_slot_never_fires() {
        let t0 = Instant::now();
        let mut timer: Delayed<u8> = Delayed::new();
        assert_eq!(timer.take_due(t0 + 1000 * MS), None);
        timer.schedule(t0, MS, 1);
        assert_eq!(timer.take_due(t0 + MS), Some(1));
        assert_eq!(timer.take_due(t0 + 1000 * MS), None);
    }
}
