use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fmt::Display;

use crate::error::{error_chain, PadError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Status {
    #[strum(serialize = "ok")]
    Success,
    #[strum(serialize = "skipped")]
    Skipped,
    #[strum(serialize = "failed")]
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub filename: OsString,
    pub status: Status,
    pub error: Option<String>,
}

/// Per-file outcomes of one run, keyed and ordered by filename
/// so that merging partial results in any order gives the same report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    outcomes: BTreeMap<OsString, Outcome>,
}

impl BatchResult {
    pub fn record_success(&mut self, filename: &OsStr) {
        self.insert(filename, Status::Success, None);
    }

    pub fn record_skipped(&mut self, filename: &OsStr) {
        self.insert(filename, Status::Skipped, None);
    }

    pub fn record_failure(&mut self, filename: &OsStr, error: &PadError) {
        self.insert(filename, Status::Failed, Some(error_chain(error)));
    }

    fn insert(&mut self, filename: &OsStr, status: Status, error: Option<String>) {
        let outcome = Outcome {
            filename: filename.to_owned(),
            status,
            error,
        };
        self.outcomes.insert(filename.to_owned(), outcome);
    }

    /// Later entries for the same filename replace earlier ones.
    pub fn merge(&mut self, other: BatchResult) {
        self.outcomes.extend(other.outcomes);
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.values()
    }

    pub fn get(&self, filename: impl AsRef<OsStr>) -> Option<&Outcome> {
        self.outcomes.get(filename.as_ref())
    }

    pub fn count(&self, status: Status) -> usize {
        self.outcomes().filter(|o| o.status == status).count()
    }

    pub fn has_failures(&self) -> bool {
        self.count(Status::Failed) > 0
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl Display for BatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for outcome in self.outcomes() {
            let status = outcome.status.to_string();
            write!(f, "{status:7} {}", outcome.filename.to_string_lossy())?;
            if let Some(error) = &outcome.error {
                write!(f, ": {error}")?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "{} processed, {} skipped, {} failed",
            self.count(Status::Success),
            self.count(Status::Skipped),
            self.count(Status::Failed)
        )
    }
}
