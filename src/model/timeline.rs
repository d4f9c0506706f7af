use chrono::{DateTime, Duration, Utc};

/// The slice of time currently shown on the meter: `[now - past, now + future)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub now: DateTime<Utc>,
    pub past: Duration,
    pub future: Duration,
}

impl TimeWindow {
    pub fn new(now: DateTime<Utc>, past: Duration, future: Duration) -> Self {
        Self { now, past, future }
    }

    /// Oldest visible instant (bottom edge).
    pub fn begin(&self) -> DateTime<Utc> {
        self.now - self.past
    }

    /// Newest visible instant (top edge), exclusive.
    pub fn end(&self) -> DateTime<Utc> {
        self.now + self.future
    }

    pub fn total(&self) -> Duration {
        self.past + self.future
    }

    pub fn total_seconds(&self) -> i64 {
        self.total().num_seconds()
    }

    /// Instant `fraction` of the way from begin (0.0) to end (1.0), to the
    /// millisecond.
    pub fn instant_at_fraction(&self, fraction: f64) -> DateTime<Utc> {
        let millis = (fraction * self.total().num_milliseconds() as f64) as i64;
        self.begin() + Duration::milliseconds(millis)
    }
}

/// Vertical time axis for a view of `height` pixels.
///
/// The axis is inverted: the window's begin sits at the bottom edge
/// (`y == height`) and later instants move up towards `y == 0`.
/// All math is integer pixel arithmetic truncating toward zero.
#[derive(Debug, Clone, Copy)]
pub struct TimeAxis {
    window: TimeWindow,
    height: i64,
    begin: DateTime<Utc>,
    end: DateTime<Utc>,
    total_seconds: i64,
}

impl TimeAxis {
    pub fn new(height: i32, window: &TimeWindow) -> Self {
        Self {
            window: *window,
            height: i64::from(height),
            begin: window.begin(),
            end: window.end(),
            // A non-positive window is a caller error; keep the division defined.
            total_seconds: window.total_seconds().max(1),
        }
    }

    /// Pixel row of `instant`, measured from the top edge.
    pub fn y_of(&self, instant: DateTime<Utc>) -> i64 {
        self.height - self.height * (instant - self.begin).num_seconds() / self.total_seconds
    }

    /// Instant under pixel row `y` (inverse of [`TimeAxis::y_of`]).
    pub fn instant_at(&self, y: f64) -> DateTime<Utc> {
        self.window.instant_at_fraction(1.0 - y / self.height as f64)
    }

    /// Top and bottom rows of a task bar, clipped to the window, with a 1px
    /// gutter on each end.
    pub fn span(&self, begin_at: DateTime<Utc>, end_at: DateTime<Utc>) -> (i32, i32) {
        let begin_at = begin_at.clamp(self.begin, self.end);
        let end_at = end_at.clamp(self.begin, self.end);
        let top = self.y_of(end_at) + 1;
        let bottom = self.y_of(begin_at) - 1;
        (top as i32, bottom as i32)
    }
}

/// Horizontal extent `(left, right)` of lane `index` when `width` pixels are
/// split evenly between `track_count` lanes.
///
/// Returns `None` when there are no lanes to split the width between.
pub fn lane_extent(width: i32, track_count: usize, index: usize) -> Option<(i32, i32)> {
    if track_count == 0 {
        return None;
    }
    let track_width = width / track_count as i32;
    let left = index as i32 * track_width + 1;
    let right = left + track_width - 2;
    Some((left, right))
}

/// Which stroke a scale line is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalePen {
    /// Repeating guide line.
    Sub,
    /// The current-time boundary.
    Head,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleLine {
    pub y: i32,
    pub pen: ScalePen,
}

/// Horizontal guide lines every `interval`, aligned so one of them falls on
/// "now", for a view of `height` pixels.
///
/// Sub lines come first in top-to-bottom order; the head line at "now" is
/// always last and is never duplicated as a sub line.
pub fn scale_lines(height: i32, past: Duration, future: Duration, interval: Duration) -> Vec<ScaleLine> {
    let height = i64::from(height);
    let total = past + future;
    let total_seconds = total.num_seconds().max(1);
    let y_at = |offset: Duration| (height * offset.num_seconds() / total_seconds) as i32;

    let mut lines = Vec::new();

    if interval > Duration::zero() {
        let mut offset = future;
        while interval < offset {
            offset -= interval;
        }
        while offset < total {
            if offset != future {
                lines.push(ScaleLine {
                    y: y_at(offset),
                    pen: ScalePen::Sub,
                });
            }
            offset += interval;
        }
    }

    lines.push(ScaleLine {
        y: y_at(future),
        pen: ScalePen::Head,
    });
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn window() -> TimeWindow {
        TimeWindow::new(now(), Duration::minutes(60), Duration::minutes(180))
    }

    #[test]
    fn window_bounds() {
        let w = window();
        assert_eq!(w.begin(), now() - Duration::hours(1));
        assert_eq!(w.end(), now() + Duration::hours(3));
        assert_eq!(w.total_seconds(), 4 * 3600);
    }

    #[test]
    fn axis_is_inverted() {
        let axis = TimeAxis::new(240, &window());
        assert_eq!(axis.y_of(window().begin()), 240);
        assert_eq!(axis.y_of(now()), 180);
        assert_eq!(axis.y_of(window().end()), 0);
    }

    #[test]
    fn window_begin_round_trips_within_a_pixel() {
        let w = window();
        for height in [100, 240, 1079, 2160] {
            let axis = TimeAxis::new(height, &w);
            let y = axis.y_of(w.begin());
            let back = axis.instant_at(y as f64);
            let drift = axis.y_of(back) - y;
            assert!(drift.abs() <= 1, "height {height}: drift {drift}");
            assert_eq!(back, w.begin());
        }
    }

    #[test]
    fn span_has_one_pixel_gutters() {
        let axis = TimeAxis::new(240, &window());
        let (top, bottom) = axis.span(now(), now() + Duration::minutes(60));
        assert_eq!(top, 121);
        assert_eq!(bottom, 179);
    }

    #[test]
    fn span_is_clipped_to_window() {
        let axis = TimeAxis::new(240, &window());
        let (top, bottom) = axis.span(now() - Duration::hours(5), now() + Duration::hours(9));
        assert_eq!(top, 1);
        assert_eq!(bottom, 239);
    }

    #[test]
    fn lanes_split_width_with_gutters() {
        assert_eq!(lane_extent(50, 1, 0), Some((1, 49)));
        assert_eq!(lane_extent(50, 2, 0), Some((1, 24)));
        assert_eq!(lane_extent(50, 2, 1), Some((26, 49)));
        assert_eq!(lane_extent(50, 3, 2), Some((33, 47)));
        assert_eq!(lane_extent(50, 0, 0), None);
    }

    #[test]
    fn scale_lines_align_on_now() {
        let lines = scale_lines(
            240,
            Duration::minutes(60),
            Duration::minutes(180),
            Duration::minutes(60),
        );
        assert_eq!(
            lines,
            vec![
                ScaleLine { y: 60, pen: ScalePen::Sub },
                ScaleLine { y: 120, pen: ScalePen::Sub },
                ScaleLine { y: 180, pen: ScalePen::Head },
            ]
        );
    }

    #[test]
    fn scale_lines_with_uneven_future() {
        // future 100 min, interval 30 → first offset 10 min
        let lines = scale_lines(
            160,
            Duration::minutes(60),
            Duration::minutes(100),
            Duration::minutes(30),
        );
        let subs: Vec<i32> = lines
            .iter()
            .filter(|l| l.pen == ScalePen::Sub)
            .map(|l| l.y)
            .collect();
        assert_eq!(subs, vec![10, 40, 70, 130]);
        assert_eq!(lines.last(), Some(&ScaleLine { y: 100, pen: ScalePen::Head }));
    }

    #[test]
    fn zero_interval_draws_only_head() {
        let lines = scale_lines(240, Duration::minutes(60), Duration::minutes(180), Duration::zero());
        assert_eq!(lines, vec![ScaleLine { y: 180, pen: ScalePen::Head }]);
    }
}
