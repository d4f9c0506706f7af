use chrono::{DateTime, Utc};

use super::task::Task;

/// One vertical lane of the meter. Members never overlap each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track<'a> {
    pub tasks: Vec<&'a Task>,
}

impl Track<'_> {
    fn conflicts_with(&self, task: &Task) -> bool {
        self.tasks
            .iter()
            .any(|member| member.overlaps(task.begin_at, task.end_at))
    }
}

/// Assign every task visible in `[begin, end)` to a lane.
///
/// Tasks are taken in input order and placed into the first existing lane
/// they do not collide with, opening a new lane otherwise. The input is not
/// sorted, so reordering the schedule can reshuffle lanes; keeping the same
/// order keeps lane assignment stable across reloads.
pub fn allocate(tasks: &[Task], begin: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Track<'_>> {
    let mut tracks: Vec<Track<'_>> = Vec::new();

    for task in tasks.iter().filter(|t| t.overlaps(begin, end)) {
        match tracks.iter_mut().find(|track| !track.conflicts_with(task)) {
            Some(track) => track.tasks.push(task),
            None => tracks.push(Track { tasks: vec![task] }),
        }
    }

    tracks
}
