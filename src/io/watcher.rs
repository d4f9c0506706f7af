use std::path::{Path, PathBuf};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, error, info};

use super::error::{Error, Result};

/// Call `on_change` whenever the file at `path` is created, modified or
/// removed.
///
/// The parent directory is watched rather than the file itself so that
/// editors which replace the file on save are still noticed. It is created if
/// missing, so a schedule written later is picked up. The callback runs on the
/// watcher's thread. Returns the watcher handle, which must be kept alive.
pub fn watch_file<F>(path: &Path, on_change: F) -> Result<RecommendedWatcher>
where
    F: Fn() + Send + 'static,
{
    let target = path.to_path_buf();
    let dir = watch_dir(path);
    std::fs::create_dir_all(&dir).map_err(|source| Error::Write {
        path: dir.clone(),
        source,
    })?;

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            if is_change_to(&event, &target) {
                debug!(path = %target.display(), kind = ?event.kind, "schedule changed");
                on_change();
            }
        }
        Err(e) => {
            error!("watcher error: {}", e);
        }
    })
    .map_err(|source| Error::Watch {
        path: path.to_path_buf(),
        source,
    })?;

    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .map_err(|source| Error::Watch {
            path: dir.clone(),
            source,
        })?;
    info!("Watching directory: {}", dir.display());

    Ok(watcher)
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn is_change_to(event: &Event, target: &Path) -> bool {
    if matches!(event.kind, EventKind::Access(_)) {
        return false;
    }
    event
        .paths
        .iter()
        .any(|p| p.file_name().is_some() && p.file_name() == target.file_name())
}
