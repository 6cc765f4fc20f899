//! Elapsed/total progress line with click and drag-to-seek.
//!
//! The control never talks to the engine. Callers push positions in with
//! [`ProgressBar::update`] and turn the results of [`ProgressBar::hit_test`]
//! and [`ProgressBar::end_drag`] into seeks themselves.

use std::fmt;
use std::time::Duration;

pub const MIN_BAR_WIDTH: usize = 10;

pub const FILL: char = '█';
pub const DRAG_FILL: char = '▓';
pub const HEAD: char = '▌';
pub const EMPTY: char = '░';

/// Format as "m:ss".
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressBar {
    position: Duration,
    duration: Duration,
    /// Provisional fraction while a drag gesture is in progress.
    drag: Option<f64>,
}

/// Geometry of one rendered line, in terminal cells from its left edge.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Layout {
    time: String,
    bar_start: usize,
    bar_width: usize,
}

/// A rendered progress line, split so the caller can style each part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedProgress {
    /// "m:ss / m:ss"
    pub time: String,
    pub bar_width: usize,
    pub filled: usize,
    /// Whether a head glyph sits right after the filled cells.
    pub head: bool,
    pub percent: Option<u8>,
    pub dragging: bool,
}

impl RenderedProgress {
    pub fn bar(&self) -> String {
        let fill = if self.dragging { DRAG_FILL } else { FILL };
        let mut bar = String::with_capacity(self.bar_width * 3);
        for i in 0..self.bar_width {
            bar.push(if i < self.filled {
                fill
            } else if i == self.filled && self.head {
                HEAD
            } else {
                EMPTY
            });
        }
        bar
    }

    pub fn suffix(&self) -> String {
        self.percent.map(|p| format!(" {p}%")).unwrap_or_default()
    }
}

impl fmt::Display for RenderedProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]{}", self.time, self.bar(), self.suffix())
    }
}

impl ProgressBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the engine's position and duration. The position is ignored
    /// while dragging; the duration is always taken.
    pub fn update(&mut self, position: Duration, duration: Duration) {
        if self.drag.is_none() {
            self.position = position;
        }
        self.duration = duration;
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Displayed fraction in `[0, 1]`: the drag fraction while dragging.
    pub fn progress(&self) -> f64 {
        if let Some(drag) = self.drag {
            return drag;
        }
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.position.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    fn displayed_position(&self) -> Duration {
        match self.drag {
            Some(fraction) if !self.duration.is_zero() => self.duration.mul_f64(fraction),
            _ => self.position,
        }
    }

    fn layout(&self, width: usize) -> Layout {
        let time = format!(
            "{} / {}",
            format_duration(self.displayed_position()),
            format_duration(self.duration)
        );
        let time_len = time.chars().count();
        // " 100%" is the widest suffix.
        let suffix_len = if self.duration.is_zero() { 0 } else { 5 };
        let bar_width = width
            .saturating_sub(time_len + 3 + suffix_len)
            .max(MIN_BAR_WIDTH);

        Layout {
            bar_start: time_len + 2,
            bar_width,
            time,
        }
    }

    /// Render for a line `width` cells wide.
    pub fn render(&self, width: usize) -> RenderedProgress {
        let layout = self.layout(width);
        let progress = self.progress();
        let filled = ((layout.bar_width as f64 * progress) as usize).min(layout.bar_width);

        RenderedProgress {
            time: layout.time,
            bar_width: layout.bar_width,
            filled,
            head: filled < layout.bar_width,
            percent: (!self.duration.is_zero()).then(|| (progress * 100.0) as u8),
            dragging: self.is_dragging(),
        }
    }

    /// Map column `x` of a `width`-wide line to a seek fraction. `None` when
    /// `x` is outside the bar or nothing with a length is loaded.
    pub fn hit_test(&self, x: usize, width: usize) -> Option<f64> {
        if self.duration.is_zero() {
            return None;
        }
        let layout = self.layout(width);
        if x < layout.bar_start || x >= layout.bar_start + layout.bar_width {
            return None;
        }
        let fraction = (x - layout.bar_start) as f64 / layout.bar_width as f64;
        Some(fraction.clamp(0.0, 1.0))
    }

    /// Like [`hit_test`](Self::hit_test), but columns past either end of the
    /// bar clamp to 0 or 1. Used while a drag is in progress.
    pub fn drag_fraction(&self, x: usize, width: usize) -> f64 {
        let layout = self.layout(width);
        let offset = x.saturating_sub(layout.bar_start) as f64;
        (offset / layout.bar_width as f64).clamp(0.0, 1.0)
    }

    pub fn start_drag(&mut self, fraction: f64) {
        self.drag = Some(clamp_fraction(fraction));
    }

    /// Move the provisional fraction. Ignored unless a drag is in progress.
    pub fn update_drag(&mut self, fraction: f64) {
        if let Some(drag) = self.drag.as_mut() {
            *drag = clamp_fraction(fraction);
        }
    }

    /// Finish the gesture and return the position to seek to. `None` when no
    /// drag was in progress or the duration is unknown.
    pub fn end_drag(&mut self) -> Option<Duration> {
        let fraction = self.drag.take()?;
        if self.duration.is_zero() {
            return None;
        }
        let target = self.duration.mul_f64(fraction);
        self.position = target;
        Some(target)
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }
}

/// Clamp to `[0, 1]`; NaN counts as the start of the bar.
fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn format_duration_pads_seconds() {
        assert_eq!(format_duration(Duration::ZERO), "0:00");
        assert_eq!(format_duration(secs(65)), "1:05");
        assert_eq!(format_duration(Duration::from_millis(3_999)), "0:03");
        assert_eq!(format_duration(secs(2 * 3600)), "120:00");
    }

    #[test]
    fn render_fills_proportionally() {
        let mut bar = ProgressBar::new();
        bar.update(secs(30), secs(120));
        // "0:30 / 2:00" is 11 cells, so 50 - 11 - 3 - 5 = 31.
        let r = bar.render(50);
        assert_eq!(r.time, "0:30 / 2:00");
        assert_eq!(r.bar_width, 31);
        assert_eq!(r.filled, 7);
        assert!(r.head);
        assert_eq!(r.percent, Some(25));
        assert!(!r.dragging);

        let text = r.to_string();
        assert!(text.starts_with("0:30 / 2:00 ["));
        assert!(text.ends_with("] 25%"));
        assert!(text.chars().count() <= 50);
        assert_eq!(text.chars().filter(|&c| c == FILL).count(), 7);
    }

    #[test]
    fn render_never_shrinks_below_minimum() {
        let mut bar = ProgressBar::new();
        bar.update(secs(1), secs(2));
        assert_eq!(bar.render(5).bar_width, MIN_BAR_WIDTH);
        assert_eq!(bar.render(0).bar_width, MIN_BAR_WIDTH);
    }

    #[test]
    fn render_clamps_and_handles_unknown_duration() {
        let mut bar = ProgressBar::new();
        bar.update(secs(5), Duration::ZERO);
        let r = bar.render(40);
        assert_eq!(r.filled, 0);
        assert_eq!(r.percent, None);

        bar.update(secs(500), secs(100));
        let r = bar.render(40);
        assert_eq!(r.filled, r.bar_width);
        assert!(!r.head);
        assert_eq!(r.percent, Some(100));
    }

    #[test]
    fn dragging_uses_distinct_fill_and_freezes_position() {
        let mut bar = ProgressBar::new();
        bar.update(secs(10), secs(100));
        bar.start_drag(0.5);

        bar.update(secs(20), secs(100));
        assert_eq!(bar.position(), secs(10));

        let r = bar.render(60);
        assert!(r.dragging);
        assert_eq!(r.time, "0:50 / 1:40");
        assert!(r.bar().contains(DRAG_FILL));
        assert!(!r.bar().contains(FILL));
    }

    #[test]
    fn hit_test_maps_columns_inside_bar() {
        let mut bar = ProgressBar::new();
        bar.update(secs(0), secs(100));
        let width = 40;
        // "0:00 / 1:40" = 11, bar starts at 13 and is 40 - 11 - 8 = 21 wide.
        assert_eq!(bar.hit_test(12, width), None);
        assert_eq!(bar.hit_test(13, width), Some(0.0));
        let mid = bar.hit_test(13 + 21 / 2, width).unwrap();
        assert!((mid - 10.0 / 21.0).abs() < 1e-9);
        assert!(bar.hit_test(13 + 20, width).is_some());
        assert_eq!(bar.hit_test(13 + 21, width), None);
    }

    #[test]
    fn hit_test_misses_without_duration() {
        let bar = ProgressBar::new();
        assert_eq!(bar.hit_test(15, 40), None);
    }

    #[test]
    fn drag_gesture_yields_seek_once() {
        let mut bar = ProgressBar::new();
        bar.update(Duration::ZERO, secs(100));

        bar.start_drag(0.3);
        bar.update_drag(0.6);
        assert_eq!(bar.end_drag(), Some(secs(60)));
        assert_eq!(bar.end_drag(), None);
        assert!(!bar.is_dragging());
    }

    #[test]
    fn update_drag_clamps_and_needs_active_gesture() {
        let mut bar = ProgressBar::new();
        bar.update(Duration::ZERO, secs(100));

        bar.update_drag(0.9);
        assert!(!bar.is_dragging());

        bar.start_drag(0.1);
        bar.update_drag(1.7);
        assert_eq!(bar.progress(), 1.0);
        bar.update_drag(-3.0);
        assert_eq!(bar.progress(), 0.0);
    }

    #[test]
    fn drag_fraction_clamps_outside_bar() {
        let mut bar = ProgressBar::new();
        bar.update(Duration::ZERO, secs(100));
        assert_eq!(bar.drag_fraction(0, 40), 0.0);
        assert_eq!(bar.drag_fraction(39, 40), 1.0);
        assert_eq!(bar.drag_fraction(13 + 21, 40), 1.0);
        assert!((bar.drag_fraction(13 + 7, 40) - 7.0 / 21.0).abs() < 1e-9);
    }

    #[test]
    fn end_drag_without_duration_does_not_seek() {
        let mut bar = ProgressBar::new();
        bar.start_drag(0.5);
        assert_eq!(bar.end_drag(), None);
        assert!(!bar.is_dragging());
    }

    #[test]
    fn nan_drag_fraction_seeks_to_start() {
        let mut bar = ProgressBar::new();
        bar.update(secs(50), secs(100));
        bar.start_drag(f64::NAN);
        assert_eq!(bar.end_drag(), Some(Duration::ZERO));

        bar.start_drag(0.5);
        bar.update_drag(f64::NAN);
        assert_eq!(bar.progress(), 0.0);
        assert_eq!(bar.end_drag(), Some(Duration::ZERO));
    }
}
