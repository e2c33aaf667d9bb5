//! Reducer for `git status --porcelain=v2` output.
//!
//! Only two record shapes are classified: the untracked marker (`?`) and
//! the two-character index/worktree code in the second field of a change
//! record. Everything else, including headers and malformed lines, is
//! skipped.

use tracing::debug;

use crate::domain::value_objects::ChangeCounts;

const UNTRACKED_MARKER: &str = "?";

/// What to do after the first untracked record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UntrackedPolicy {
    /// Keep scanning and count every untracked record
    #[default]
    CountAll,
    /// Count one untracked record and stop reading further lines
    StopAtFirst,
}

/// Staged and unstaged counters for one working copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsedStatus {
    pub staged: ChangeCounts,
    pub unstaged: ChangeCounts,
}

/// Counter a recognized index/worktree code increments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change {
    StagedNew,
    StagedModified,
    StagedDeleted,
    UnstagedModified,
    UnstagedDeleted,
}

impl Change {
    // Renames fold into modifications. There is deliberately no unstaged
    // "new" code: untracked files only arrive through the `?` marker.
    fn from_code(code: &str) -> Option<Self> {
        match code {
            "A." => Some(Change::StagedNew),
            "M." | "R." => Some(Change::StagedModified),
            "D." => Some(Change::StagedDeleted),
            ".M" | ".R" => Some(Change::UnstagedModified),
            ".D" => Some(Change::UnstagedDeleted),
            _ => None,
        }
    }
}

/// Parser for the machine-readable change-status stream
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusParser {
    policy: UntrackedPolicy,
}

impl StatusParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_untracked_policy(policy: UntrackedPolicy) -> Self {
        Self { policy }
    }

    pub fn parse(&self, report: &str) -> ParsedStatus {
        let mut status = ParsedStatus::default();

        for line in report.lines() {
            let mut fields = line.split(' ');
            let record_type = fields.next().unwrap_or_default();

            if record_type == UNTRACKED_MARKER {
                status.unstaged.new += 1;
                if self.policy == UntrackedPolicy::StopAtFirst {
                    break;
                }
                continue;
            }

            let Some(code) = fields.next() else {
                if !line.is_empty() {
                    debug!("Skipping malformed status line: {:?}", line);
                }
                continue;
            };

            match Change::from_code(code) {
                Some(Change::StagedNew) => status.staged.new += 1,
                Some(Change::StagedModified) => status.staged.modified += 1,
                Some(Change::StagedDeleted) => status.staged.deleted += 1,
                Some(Change::UnstagedModified) => status.unstaged.modified += 1,
                Some(Change::UnstagedDeleted) => status.unstaged.deleted += 1,
                None => {}
            }
        }

        status
    }
}
