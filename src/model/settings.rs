//! User-tunable meter settings.
//!
//! Stored as JSON with durations in whole minutes and `#RRGGBB` colour
//! strings. The struct carries `#[serde(default)]`, so a partial file only
//! overrides the keys it names and everything else keeps its default.

use chrono::Duration;
use egui::Color32;
use serde::{Deserialize, Serialize};

/// A duration persisted as a whole number of minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Minutes(pub i64);

impl From<Duration> for Minutes {
    fn from(d: Duration) -> Self {
        Minutes(d.num_minutes())
    }
}

/// Serde adapter: `Duration` fields stored as [`Minutes`].
mod minutes {
    use super::Minutes;
    use chrono::Duration;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Minutes::from(*duration).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Minutes(m) = Minutes::deserialize(deserializer)?;
        Duration::try_minutes(m).ok_or_else(|| D::Error::custom(format!("{} minutes is out of range", m)))
    }
}

pub mod hex_color {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let [r, g, b, _] = color.to_array();
        serializer.serialize_str(&format!("#{:02X}{:02X}{:02X}", r, g, b))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_hex_color(&s).map_err(serde::de::Error::custom)
    }

    pub fn parse_hex_color(s: &str) -> Result<Color32, String> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("Invalid hex color '{}': expected #RRGGBB", s));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("Invalid hex color '{}': {}", s, e))
        };
        Ok(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub target_display_index: usize,
    /// Meter width in pixels.
    pub meter_width: u32,
    /// Background alpha, 0 (invisible) to 255 (opaque).
    pub meter_opacity: u8,
    #[serde(rename = "past_minutes", with = "minutes")]
    pub past: Duration,
    #[serde(rename = "future_minutes", with = "minutes")]
    pub future: Duration,
    #[serde(rename = "scale_interval_minutes", with = "minutes")]
    pub scale_interval: Duration,
    /// Program used to edit the schedule. Empty means the OS default opener.
    pub schedule_edit_command: String,
    #[serde(with = "hex_color")]
    pub background_color: Color32,
    #[serde(with = "hex_color")]
    pub main_scale_color: Color32,
    #[serde(with = "hex_color")]
    pub sub_scales_color: Color32,
    #[serde(with = "hex_color")]
    pub chart_color: Color32,
    #[serde(with = "hex_color")]
    pub tip_text_color: Color32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_display_index: 0,
            meter_width: 50,
            meter_opacity: 128,
            past: Duration::hours(1),
            future: Duration::hours(3),
            scale_interval: Duration::hours(1),
            schedule_edit_command: String::new(),
            background_color: Color32::from_rgb(0, 0, 0),
            main_scale_color: Color32::from_rgb(255, 255, 255),
            sub_scales_color: Color32::from_rgb(128, 128, 128),
            chart_color: Color32::from_rgb(255, 128, 0),
            tip_text_color: Color32::from_rgb(255, 255, 255),
        }
    }
}

impl Settings {
    /// Longest duration accepted for `past`, `future` or `scale_interval`.
    pub fn max_span() -> Duration {
        Duration::days(366)
    }

    /// Whether every duration lies within [`Settings::max_span`] either way,
    /// which keeps the window arithmetic clear of overflow.
    pub fn durations_in_range(&self) -> bool {
        let limit = Self::max_span();
        [self.past, self.future, self.scale_interval]
            .iter()
            .all(|d| -limit <= *d && *d <= limit)
    }

    /// Total visible time span (`past + future`).
    pub fn visible_duration(&self) -> Duration {
        self.past + self.future
    }

    /// Whether the time axis can be projected with these settings.
    pub fn has_visible_window(&self) -> bool {
        self.visible_duration() > Duration::zero()
    }
}
