use chrono::{DateTime, Duration, Utc};

use super::task::Task;
use super::timeline::TimeWindow;

/// Instant under a cursor at `cursor_y`, for a meter whose top edge is at
/// `window_top` and which is `viewport_height` pixels tall.
///
/// The top edge maps to `now + future`, the bottom edge to `now - past`.
pub fn focus_instant(
    cursor_y: f64,
    window_top: f64,
    viewport_height: f64,
    past: Duration,
    future: Duration,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    let focus_ratio = 1.0 - (cursor_y - window_top) / viewport_height;
    TimeWindow::new(now, past, future).instant_at_fraction(focus_ratio)
}

/// Every task running at the instant under the cursor, in input order.
pub fn focused_tasks<'a>(
    cursor_y: f64,
    window_top: f64,
    viewport_height: f64,
    past: Duration,
    future: Duration,
    now: DateTime<Utc>,
    tasks: &'a [Task],
) -> Vec<&'a Task> {
    let focus_at = focus_instant(cursor_y, window_top, viewport_height, past, future, now);
    tasks
        .iter()
        .filter(|task| task.overlaps(focus_at, focus_at))
        .collect()
}
