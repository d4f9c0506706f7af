//! Floating tip next to the meter listing the tasks under the cursor.

use chrono::{DateTime, Duration, Utc};
use egui::{Align2, Pos2, Vec2};

use crate::model::{Settings, Task};
use crate::text::TextMap;
use crate::ui::theme;

/// One task line: subject on the left, time indicator on the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipRow {
    pub subject: String,
    pub indicator: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TipContent {
    Rows(Vec<TipRow>),
    /// A schedule problem; replaces the task list until the next good reload.
    Error(String),
}

/// Decide what the tip shows. `None` means the tip is hidden.
///
/// A pending error always wins, even with nothing under the cursor.
pub fn tip_content(focused: &[&Task], error: Option<&str>, now: DateTime<Utc>, text: &TextMap) -> Option<TipContent> {
    if let Some(message) = error {
        return Some(TipContent::Error(message.to_string()));
    }
    if focused.is_empty() {
        return None;
    }
    let rows = focused
        .iter()
        .map(|task| TipRow {
            subject: task.subject.clone(),
            indicator: indicator(task, now, text),
        })
        .collect();
    Some(TipContent::Rows(rows))
}

/// "N min until start" before the task, "N min remaining" during it and an
/// empty string once it is over.
pub fn indicator(task: &Task, now: DateTime<Utc>, text: &TextMap) -> String {
    if now < task.begin_at {
        text.of("TIP_UNTIL_START")
            .set("minutes", ceil_minutes(task.begin_at - now))
            .into()
    } else if now < task.end_at {
        text.of("TIP_REMAINING")
            .set("minutes", ceil_minutes(task.end_at - now))
            .into()
    } else {
        String::new()
    }
}

fn ceil_minutes(d: Duration) -> i64 {
    (d.num_milliseconds() as f64 / 60_000.0).ceil() as i64
}

/// Outer size of the tip for two columns of the given widths.
pub fn tip_size(subject_width: f32, indicator_width: f32, rows: usize, row_height: f32) -> Vec2 {
    let gap = if indicator_width > 0.0 { theme::TIP_COLUMN_GAP } else { 0.0 };
    Vec2::new(
        theme::TIP_PADDING_LEFT + subject_width + gap + indicator_width + theme::TIP_PADDING_RIGHT,
        theme::TIP_PADDING_TOP + rows as f32 * row_height + theme::TIP_PADDING_BOTTOM,
    )
}

/// Show the tip as a borderless always-on-top viewport whose top-left corner
/// is at `position` (screen coordinates).
pub fn show_tip(ctx: &egui::Context, content: &TipContent, position: Pos2, settings: &Settings) {
    let font = theme::font_tip();
    let color = settings.tip_text_color;

    let lines: Vec<(String, String)> = match content {
        TipContent::Rows(rows) => rows
            .iter()
            .map(|r| (r.subject.clone(), r.indicator.clone()))
            .collect(),
        TipContent::Error(message) => message.lines().map(|l| (l.to_string(), String::new())).collect(),
    };

    let (row_height, subject_width, indicator_width) = ctx.fonts(|fonts| {
        let width = |s: &str| fonts.layout_no_wrap(s.to_string(), font.clone(), color).size().x;
        let subject_width = lines.iter().map(|(s, _)| width(s)).fold(0.0, f32::max);
        let indicator_width = lines.iter().map(|(_, i)| width(i)).fold(0.0, f32::max);
        (fonts.row_height(&font), subject_width, indicator_width)
    });
    let size = tip_size(subject_width, indicator_width, lines.len(), row_height);

    ctx.show_viewport_immediate(
        egui::ViewportId::from_hash_of("meter_tip"),
        egui::ViewportBuilder::default()
            .with_title("meter-tip")
            .with_decorations(false)
            .with_always_on_top()
            .with_resizable(false)
            .with_taskbar(false)
            .with_mouse_passthrough(true)
            .with_position(position)
            .with_inner_size(size),
        |ctx, _class| {
            let frame = egui::Frame::none().fill(theme::tip_background(settings));
            egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
                let painter = ui.painter();
                let origin = ui.max_rect().min;
                let right = origin.x + size.x - theme::TIP_PADDING_RIGHT;
                for (i, (subject, indicator)) in lines.iter().enumerate() {
                    let y = origin.y + theme::TIP_PADDING_TOP + i as f32 * row_height;
                    painter.text(
                        Pos2::new(origin.x + theme::TIP_PADDING_LEFT, y),
                        Align2::LEFT_TOP,
                        subject,
                        font.clone(),
                        color,
                    );
                    painter.text(Pos2::new(right, y), Align2::RIGHT_TOP, indicator, font.clone(), color);
                }
            });
        },
    );
}
