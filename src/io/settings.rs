use std::path::Path;

use tracing::{debug, warn};

use super::error::{Error, Result};
use crate::model::Settings;

/// Read `settings.json`.
///
/// A missing file is not an error and yields the defaults. Durations that
/// are out of range, or that leave no visible time span, are reset to their
/// defaults so the meter can always be projected.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(Error::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut settings: Settings = serde_json::from_str(&json).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if !settings.durations_in_range() {
        warn!(
            past_minutes = settings.past.num_minutes(),
            future_minutes = settings.future.num_minutes(),
            scale_interval_minutes = settings.scale_interval.num_minutes(),
            "durations exceed {} days, restoring defaults",
            Settings::max_span().num_days()
        );
        let defaults = Settings::default();
        settings.past = defaults.past;
        settings.future = defaults.future;
        settings.scale_interval = defaults.scale_interval;
    }

    if !settings.has_visible_window() {
        warn!(
            past_minutes = settings.past.num_minutes(),
            future_minutes = settings.future.num_minutes(),
            "visible duration must be positive, restoring defaults"
        );
        let defaults = Settings::default();
        settings.past = defaults.past;
        settings.future = defaults.future;
    }

    Ok(settings)
}

/// [`load_settings`], falling back to the defaults with a warning when the
/// file cannot be read or parsed.
pub fn load_settings_or_default(path: &Path) -> Settings {
    load_settings(path).unwrap_or_else(|e| {
        warn!("{}; using default settings", e);
        Settings::default()
    })
}
