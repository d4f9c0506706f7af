use std::path::Path;
use std::process::Command;

use chrono::{DateTime, Utc};
use tracing::info;

use super::error::{Error, Result};
use super::schedule::prepare_schedule;

/// Open the schedule for editing, creating a template first if needed.
///
/// `command` is the editor program; when blank the OS default handler for
/// the file is used. The editor is not waited on.
pub fn edit_schedule(path: &Path, command: &str, sample_subject: &str, now: DateTime<Utc>) -> Result<()> {
    if prepare_schedule(path, sample_subject, now)? {
        info!(path = %path.display(), "wrote schedule template");
    }
    launch_editor(command, path)
}

fn launch_editor(command: &str, path: &Path) -> Result<()> {
    let command = command.trim();
    if command.is_empty() {
        open::that_detached(path).map_err(|source| Error::Spawn {
            command: "default opener".into(),
            source,
        })?;
    } else {
        Command::new(command)
            .arg(path)
            .spawn()
            .map_err(|source| Error::Spawn {
                command: command.to_string(),
                source,
            })?;
    }
    info!(path = %path.display(), editor = %command, "launched schedule editor");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_editor_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");
        let err = edit_schedule(&path, "time-meter-no-such-editor", "Sample", Utc::now()).unwrap_err();
        assert!(matches!(err, Error::Spawn { ref command, .. } if command == "time-meter-no-such-editor"));
        // The template is written before the launch is attempted.
        assert!(path.exists());
    }

    #[test]
    fn directory_is_rejected_before_launch() {
        let dir = tempfile::tempdir().unwrap();
        let err = edit_schedule(dir.path(), "time-meter-no-such-editor", "Sample", Utc::now()).unwrap_err();
        assert!(matches!(err, Error::IsDirectory(_)));
    }
}
