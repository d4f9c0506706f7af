use std::path::{Path, PathBuf};

const SETTINGS_FILENAME: &str = "settings.json";
const SCHEDULE_FILENAME: &str = "schedule.json";

/// Where the settings and schedule files live.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub settings: PathBuf,
    pub schedule: PathBuf,
}

impl AppPaths {
    /// Resolve paths inside the OS config directory, or the working directory
    /// when no home directory can be determined.
    pub fn discover() -> Self {
        match directories::ProjectDirs::from("", "", "TimeMeter") {
            Some(proj_dirs) => Self::in_dir(proj_dirs.config_dir()),
            None => Self::in_dir(Path::new(".")),
        }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self {
            settings: dir.join(SETTINGS_FILENAME),
            schedule: dir.join(SCHEDULE_FILENAME),
        }
    }
}
