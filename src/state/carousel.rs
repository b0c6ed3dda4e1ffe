/// Carousel mechanics
///
/// Index arithmetic for the looping carousel and the auto-advance clock.
/// No widgets here; the Carousel View drives these from its messages.
use std::time::{Duration, Instant};

/// Copies of the item sequence laid out on the track
pub const TRACK_COPIES: usize = 3;

/// Position in the current item set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Advance one slide, wrapping to 0 after the last real item
    pub fn next(&mut self) {
        self.index = if self.index + 1 >= self.len {
            0
        } else {
            self.index + 1
        };
    }

    /// Go back one slide, wrapping from 0 to the last real item
    pub fn prev(&mut self) {
        self.index = if self.index == 0 {
            self.len.saturating_sub(1)
        } else {
            self.index - 1
        };
    }

    /// Jump straight to `index`
    pub fn go_to(&mut self, index: usize) {
        self.index = index;
    }

    /// Horizontal translation of the track, as a percentage of the viewport.
    ///
    /// Each tile is a third of the viewport. An index past the real items is
    /// pinned to the start of the second copy.
    pub fn offset_percent(&self) -> f32 {
        let step = 100.0 / TRACK_COPIES as f32;
        if self.index >= self.len {
            self.len as f32 * step
        } else {
            self.index as f32 * step
        }
    }
}

/// The items repeated `TRACK_COPIES` times, so the loop never shows an edge
pub fn track<T>(items: &[T]) -> impl Iterator<Item = (usize, &T)> {
    items.iter().cycle().take(items.len() * TRACK_COPIES).enumerate()
}

/// Clock for advancing the carousel after a period without index changes
#[derive(Debug, Clone, Copy)]
pub struct AutoAdvance {
    interval: Duration,
    last_change: Instant,
}

impl AutoAdvance {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_change: now,
        }
    }

    /// Restart the countdown (index or item count changed)
    pub fn reset(&mut self, now: Instant) {
        self.last_change = now;
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_change) >= self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps_from_last() {
        let mut carousel = Carousel::new(5);
        carousel.go_to(4);
        carousel.next();
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn test_next_steps_forward() {
        let mut carousel = Carousel::new(5);
        carousel.next();
        carousel.next();
        assert_eq!(carousel.index(), 2);
    }

    #[test]
    fn test_prev_wraps_from_first() {
        let mut carousel = Carousel::new(5);
        carousel.prev();
        assert_eq!(carousel.index(), 4);
        carousel.prev();
        assert_eq!(carousel.index(), 3);
    }

    #[test]
    fn test_go_to_ignores_current_index() {
        let mut carousel = Carousel::new(6);
        for start in 0..6 {
            carousel.go_to(start);
            carousel.go_to(3);
            assert_eq!(carousel.index(), 3);
        }
    }

    #[test]
    fn test_next_past_end_returns_to_start() {
        let mut carousel = Carousel::new(4);
        carousel.go_to(9);
        carousel.next();
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn test_empty_carousel_stays_at_zero() {
        let mut carousel = Carousel::new(0);
        carousel.next();
        assert_eq!(carousel.index(), 0);
        carousel.prev();
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn test_offset_is_a_third_per_index() {
        let mut carousel = Carousel::new(5);
        for index in 0..5 {
            carousel.go_to(index);
            let expected = index as f32 * (100.0 / 3.0);
            assert!((carousel.offset_percent() - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_offset_is_pinned_past_end() {
        let mut carousel = Carousel::new(4);
        carousel.go_to(7);
        assert!((carousel.offset_percent() - 4.0 * (100.0 / 3.0)).abs() < 1e-4);
    }

    #[test]
    fn test_track_has_three_copies() {
        let items = ["a", "b"];
        let laid_out: Vec<(usize, &&str)> = track(&items).collect();
        assert_eq!(laid_out.len(), 6);
        assert_eq!(laid_out[3], (3, &"b"));
        assert_eq!(laid_out[4], (4, &"a"));
    }

    #[test]
    fn test_auto_advance_due_after_interval() {
        let start = Instant::now();
        let clock = AutoAdvance::new(Duration::from_millis(5000), start);

        assert!(!clock.is_due(start + Duration::from_millis(4999)));
        assert!(clock.is_due(start + Duration::from_millis(5000)));
    }

    #[test]
    fn test_auto_advance_reset_restarts_countdown() {
        let start = Instant::now();
        let mut clock = AutoAdvance::new(Duration::from_millis(5000), start);

        clock.reset(start + Duration::from_millis(3000));

        assert!(!clock.is_due(start + Duration::from_millis(6000)));
        assert!(clock.is_due(start + Duration::from_millis(8000)));
    }
}
