use std::time::{Duration, Instant};

/// Paces a fixed number of presents separated by a fixed interval.
///
/// The viewer asks `ready_for_frame` before drawing, reports each
/// present through `mark_rendered`, and exits once `finished` holds.
/// The interval after the final present is still observed, so the last
/// frame stays on screen as long as the ones before it.
#[derive(Debug)]
pub struct FramePacer {
    frames_total: u32,
    interval: Duration,
    rendered: u32,
    next_deadline: Option<Instant>,
}

impl FramePacer {
    pub fn new(frames_total: u32, interval: Duration) -> Self {
        Self {
            frames_total,
            interval,
            rendered: 0,
            next_deadline: None,
        }
    }

    pub fn frames_rendered(&self) -> u32 {
        self.rendered
    }

    /// True when another frame may be drawn right now.
    pub fn ready_for_frame(&self, now: Instant) -> bool {
        self.rendered < self.frames_total
            && self.next_deadline.map_or(true, |deadline| now >= deadline)
    }

    /// Records a presented frame and schedules the next slot.
    pub fn mark_rendered(&mut self, now: Instant) {
        self.rendered = self.rendered.saturating_add(1);
        self.next_deadline = Some(now + self.interval);
    }

    /// Deadline the event loop should sleep until, if one is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_deadline
    }

    /// True once every frame has been presented and the trailing
    /// interval has elapsed.
    pub fn finished(&self, now: Instant) -> bool {
        self.rendered >= self.frames_total
            && self.next_deadline.map_or(true, |deadline| now >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn yields_exactly_the_requested_number_of_slots() {
        let mut pacer = FramePacer::new(3, INTERVAL);
        let mut now = Instant::now();
        let mut slots = 0;

        for _ in 0..10 {
            if pacer.ready_for_frame(now) {
                pacer.mark_rendered(now);
                slots += 1;
            }
            now += INTERVAL;
        }

        assert_eq!(slots, 3);
        assert_eq!(pacer.frames_rendered(), 3);
    }

    #[test]
    fn slots_are_separated_by_the_interval() {
        let mut pacer = FramePacer::new(2, INTERVAL);
        let start = Instant::now();

        assert!(pacer.ready_for_frame(start));
        pacer.mark_rendered(start);

        assert!(!pacer.ready_for_frame(start));
        assert!(!pacer.ready_for_frame(start + INTERVAL / 2));
        assert!(pacer.ready_for_frame(start + INTERVAL));
        assert_eq!(pacer.next_deadline(), Some(start + INTERVAL));
    }

    #[test]
    fn finishes_only_after_the_trailing_hold() {
        let mut pacer = FramePacer::new(1, INTERVAL);
        let start = Instant::now();

        pacer.mark_rendered(start);
        assert!(!pacer.ready_for_frame(start + INTERVAL));
        assert!(!pacer.finished(start));
        assert!(!pacer.finished(start + INTERVAL / 2));
        assert!(pacer.finished(start + INTERVAL));
    }

    #[test]
    fn zero_frames_finishes_immediately() {
        let pacer = FramePacer::new(0, INTERVAL);
        let now = Instant::now();
        assert!(!pacer.ready_for_frame(now));
        assert!(pacer.finished(now));
    }
}
