use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Guided walkthrough over the categories
// ---------------------------------------------------------------------------

/// What the walkthrough wants shown after a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Show the category at this index.
    Show(usize),
    /// Every category has been shown; hand control to the user.
    Finished,
}

/// Cycles once through `len` categories, one step per `interval`.
///
/// The first category appears one interval after `start`; the walkthrough
/// finishes one interval after the last category appeared.
#[derive(Debug, Clone)]
pub struct Walkthrough {
    len: usize,
    next_index: usize,
    interval: Duration,
    next_at: Option<Instant>,
}

impl Walkthrough {
    pub fn start(len: usize, interval: Duration, now: Instant) -> Self {
        Self {
            len,
            next_index: 0,
            interval,
            next_at: Some(now + interval),
        }
    }

    /// Advance if the next step is due. At most one step per call.
    pub fn poll(&mut self, now: Instant) -> Option<Step> {
        let due = self.next_at?;
        if now < due {
            return None;
        }
        if self.next_index < self.len {
            let index = self.next_index;
            self.next_index += 1;
            self.next_at = Some(now + self.interval);
            Some(Step::Show(index))
        } else {
            self.next_at = None;
            Some(Step::Finished)
        }
    }

    /// End the walkthrough immediately.
    pub fn skip(&mut self) {
        self.next_index = self.len;
        self.next_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_at.is_some()
    }

    /// Time left until the next step, if one is pending.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_at.map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_secs(3);

    #[test]
    fn test_steps_through_every_category_then_finishes() {
        let t0 = Instant::now();
        let mut wt = Walkthrough::start(2, STEP, t0);

        assert_eq!(wt.poll(t0), None);
        assert_eq!(wt.poll(t0 + Duration::from_secs(2)), None);
        assert_eq!(wt.poll(t0 + STEP), Some(Step::Show(0)));
        assert_eq!(wt.poll(t0 + STEP), None);
        assert_eq!(wt.poll(t0 + STEP * 2), Some(Step::Show(1)));
        assert!(wt.is_running());
        assert_eq!(wt.poll(t0 + STEP * 3), Some(Step::Finished));
        assert!(!wt.is_running());
        assert_eq!(wt.poll(t0 + STEP * 10), None);
    }

    #[test]
    fn test_late_poll_advances_one_step() {
        let t0 = Instant::now();
        let mut wt = Walkthrough::start(3, STEP, t0);
        let late = t0 + STEP * 5;
        assert_eq!(wt.poll(late), Some(Step::Show(0)));
        assert_eq!(wt.poll(late), None);
        assert_eq!(wt.time_until_next(late), Some(STEP));
    }

    #[test]
    fn test_no_categories_just_finishes() {
        let t0 = Instant::now();
        let mut wt = Walkthrough::start(0, STEP, t0);
        assert_eq!(wt.poll(t0 + STEP), Some(Step::Finished));
    }

    #[test]
    fn test_skip() {
        let t0 = Instant::now();
        let mut wt = Walkthrough::start(4, STEP, t0);
        wt.skip();
        assert!(!wt.is_running());
        assert_eq!(wt.poll(t0 + STEP), None);
        assert_eq!(wt.time_until_next(t0), None);
    }
}
