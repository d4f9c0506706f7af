use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single scheduled entry shown on the meter.
///
/// `begin_at` is inclusive and `end_at` exclusive. Nothing checks that
/// `begin_at <= end_at`; an inverted range never overlaps anything and so
/// simply never renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub subject: String,
    pub begin_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

impl Task {
    pub fn new(subject: impl Into<String>, begin_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        Self {
            subject: subject.into(),
            begin_at,
            end_at,
        }
    }

    /// Half-open overlap test against `[begin, end)`.
    ///
    /// Touching endpoints do not overlap. With `begin == end == t` this is a
    /// point query that is exclusive on both sides, so a task starting exactly
    /// at `t` is not reported.
    pub fn overlaps(&self, begin: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        begin < self.end_at && self.begin_at < end
    }
}
