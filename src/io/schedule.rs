use std::path::Path;

use chrono::{DateTime, Duration, DurationRound, Utc};

use super::error::{Error, Result};
use crate::model::Task;

/// Load the schedule (a JSON array of tasks).
pub fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    let json = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Save the schedule as pretty-printed JSON.
pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<()> {
    let json = serde_json::to_string_pretty(tasks)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| Error::Write {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, json).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Starter entry written when the user first edits a missing schedule:
/// begins three minutes after the current minute and lasts an hour.
pub fn template_task(subject: impl Into<String>, now: DateTime<Utc>) -> Task {
    let minute = now.duration_trunc(Duration::minutes(1)).unwrap_or(now);
    let begin_at = minute + Duration::minutes(3);
    Task::new(subject, begin_at, begin_at + Duration::hours(1))
}

/// Make sure there is a schedule file to open.
///
/// Writes a one-task template if nothing exists at `path` and returns whether
/// it did so. A directory at `path` is an error.
pub fn prepare_schedule(path: &Path, sample_subject: &str, now: DateTime<Utc>) -> Result<bool> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Err(Error::IsDirectory(path.to_path_buf())),
        Ok(_) => Ok(false),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            save_tasks(path, &[template_task(sample_subject, now)])?;
            Ok(true)
        }
        Err(source) => Err(Error::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
