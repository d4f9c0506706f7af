use egui::{Color32, FontId, Stroke, Visuals};

use crate::model::{ScalePen, Settings};

// ── Sizes ────────────────────────────────────────────────────────────────────

/// Height used for the meter before the monitor size is known.
pub const FALLBACK_METER_HEIGHT: f32 = 1080.0;

pub const TIP_PADDING_LEFT: f32 = 5.0;
pub const TIP_PADDING_RIGHT: f32 = 5.0;
pub const TIP_PADDING_TOP: f32 = 2.0;
pub const TIP_PADDING_BOTTOM: f32 = 5.0;
/// Gap between the subject column and the time column.
pub const TIP_COLUMN_GAP: f32 = 10.0;

pub const SCALE_LINE_WIDTH: f32 = 1.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_tip() -> FontId {
    FontId::proportional(13.0)
}

// ── Colours derived from settings ────────────────────────────────────────────

/// Meter background with the configured opacity applied.
pub fn meter_background(settings: &Settings) -> Color32 {
    let [r, g, b, _] = settings.background_color.to_array();
    Color32::from_rgba_unmultiplied(r, g, b, settings.meter_opacity)
}

pub fn tip_background(settings: &Settings) -> Color32 {
    settings.background_color
}

pub fn scale_stroke(settings: &Settings, pen: ScalePen) -> Stroke {
    let color = match pen {
        ScalePen::Sub => settings.sub_scales_color,
        ScalePen::Head => settings.main_scale_color,
    };
    Stroke::new(SCALE_LINE_WIDTH, color)
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context, settings: &Settings) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(settings.tip_text_color);
    visuals.panel_fill = Color32::TRANSPARENT;
    visuals.window_fill = tip_background(settings);
    visuals.window_stroke = Stroke::new(1.0, settings.sub_scales_color);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, settings.chart_color);
    visuals.selection.bg_fill = settings.chart_color.gamma_multiply(0.4);

    ctx.set_visuals(visuals);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_carries_opacity() {
        let mut settings = Settings::default();
        settings.background_color = Color32::from_rgb(10, 20, 30);
        settings.meter_opacity = 255;
        assert_eq!(meter_background(&settings), Color32::from_rgb(10, 20, 30));
        settings.meter_opacity = 0;
        assert_eq!(meter_background(&settings).a(), 0);
    }

    #[test]
    fn head_line_uses_main_scale_color() {
        let settings = Settings::default();
        assert_eq!(scale_stroke(&settings, ScalePen::Head).color, settings.main_scale_color);
        assert_eq!(scale_stroke(&settings, ScalePen::Sub).color, settings.sub_scales_color);
    }
}
