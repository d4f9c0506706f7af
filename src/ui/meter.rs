use chrono::{DateTime, Utc};
use egui::{Pos2, Rect, Response, Sense, Ui, Vec2};

use crate::model::timeline::{lane_extent, scale_lines};
use crate::model::track::allocate;
use crate::model::{ScaleLine, Settings, Task, TimeAxis, TimeWindow};
use crate::ui::theme;

/// One task bar in pixel space, relative to the meter's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneRect {
    pub track: usize,
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Everything needed to draw one meter frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeterFrame {
    pub lanes: Vec<LaneRect>,
    pub scale_lines: Vec<ScaleLine>,
}

/// Lay out `tasks` for a `width` x `height` meter at `now`.
pub fn build_frame(tasks: &[Task], settings: &Settings, width: i32, height: i32, now: DateTime<Utc>) -> MeterFrame {
    let window = TimeWindow::new(now, settings.past, settings.future);
    let axis = TimeAxis::new(height, &window);
    let tracks = allocate(tasks, window.begin(), window.end());

    let mut lanes = Vec::new();
    for (index, track) in tracks.iter().enumerate() {
        let Some((left, right)) = lane_extent(width, tracks.len(), index) else {
            continue;
        };
        for task in &track.tasks {
            let (top, bottom) = axis.span(task.begin_at, task.end_at);
            lanes.push(LaneRect {
                track: index,
                left,
                top,
                right,
                bottom,
            });
        }
    }

    MeterFrame {
        lanes,
        scale_lines: scale_lines(height, settings.past, settings.future, settings.scale_interval),
    }
}

/// Paint the meter into the whole available area and return its response.
pub fn show_meter(tasks: &[Task], settings: &Settings, now: DateTime<Utc>, ui: &mut Ui) -> Response {
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click());
    let rect = response.rect;
    let frame = build_frame(
        tasks,
        settings,
        rect.width().round() as i32,
        rect.height().round() as i32,
        now,
    );

    painter.rect_filled(rect, 0.0, theme::meter_background(settings));

    for lane in &frame.lanes {
        let bar = Rect::from_min_max(
            rect.min + Vec2::new(lane.left as f32, lane.top as f32),
            rect.min + Vec2::new(lane.right as f32, lane.bottom as f32),
        );
        if bar.is_positive() {
            painter.rect_filled(bar, 0.0, settings.chart_color);
        }
    }

    // Scale lines go on top of the bars; the head line is last.
    for line in &frame.scale_lines {
        let y = rect.top() + line.y as f32 + 0.5;
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            theme::scale_stroke(settings, line.pen),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScalePen;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn task(subject: &str, from_min: i64, to_min: i64) -> Task {
        Task::new(
            subject,
            now() + Duration::minutes(from_min),
            now() + Duration::minutes(to_min),
        )
    }

    #[test]
    fn overlapping_tasks_split_the_width() {
        let tasks = vec![task("T1", -10, 50), task("T2", 10, 40)];
        let frame = build_frame(&tasks, &Settings::default(), 50, 240, now());
        assert_eq!(
            frame.lanes,
            vec![
                LaneRect { track: 0, left: 1, top: 131, right: 24, bottom: 189 },
                LaneRect { track: 1, left: 26, top: 141, right: 49, bottom: 169 },
            ]
        );
    }

    #[test]
    fn single_track_spans_full_width() {
        let tasks = vec![task("a", 0, 60), task("b", 60, 120)];
        let frame = build_frame(&tasks, &Settings::default(), 50, 240, now());
        assert_eq!(frame.lanes.len(), 2);
        assert!(frame.lanes.iter().all(|l| l.track == 0 && l.left == 1 && l.right == 49));
        // Touching tasks leave a 2px gap between them.
        assert_eq!(frame.lanes[0].top, 121);
        assert_eq!(frame.lanes[1].bottom, 119);
    }

    #[test]
    fn empty_schedule_still_has_scale_lines() {
        let frame = build_frame(&[], &Settings::default(), 50, 240, now());
        assert!(frame.lanes.is_empty());
        assert_eq!(frame.scale_lines.len(), 3);
        assert_eq!(frame.scale_lines.last().map(|l| l.pen), Some(ScalePen::Head));
    }
}
