//! Scripted command runner for testing
//!
//! Answers queries from a table keyed by repository directory name and
//! command, and records every call for verification.

use async_trait::async_trait;
use gitfan::infrastructure::process::{CommandRunner, CommandRunnerError, InspectionResult};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Inspection kinds the aggregator issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    Branch,
    ExactTag,
    ShortCommit,
    Status,
}

impl Query {
    fn from_args(args: &[String]) -> Option<Self> {
        match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
            ["rev-parse", "--abbrev-ref", "HEAD"] => Some(Query::Branch),
            ["describe", ..] => Some(Query::ExactTag),
            ["rev-parse", "--short", "HEAD"] => Some(Query::ShortCommit),
            ["status", ..] => Some(Query::Status),
            _ => None,
        }
    }
}

/// Runner that replays canned answers
#[derive(Clone, Default)]
pub struct ScriptedRunner {
    answers: Arc<Mutex<HashMap<(String, Query), InspectionResult>>>,
    call_history: Arc<Mutex<Vec<(String, Query)>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` for repository `repo` with successful output
    pub fn succeed(self, repo: &str, query: Query, stdout: &str) -> Self {
        self.answers
            .lock()
            .unwrap()
            .insert((repo.to_string(), query), InspectionResult::success(stdout));
        self
    }

    /// Answer `query` for repository `repo` with a non-zero exit
    pub fn fail(self, repo: &str, query: Query, stderr: &str) -> Self {
        self.answers.lock().unwrap().insert(
            (repo.to_string(), query),
            InspectionResult::failure(
                CommandRunnerError::CommandFailed {
                    exit_code: Some(128),
                },
                stderr,
            ),
        );
        self
    }

    /// Every call made so far, in call order
    pub fn call_history(&self) -> Vec<(String, Query)> {
        self.call_history.lock().unwrap().clone()
    }

    fn default_answer(query: Query) -> InspectionResult {
        match query {
            Query::Branch => InspectionResult::success("main\n"),
            Query::ExactTag => InspectionResult::failure(
                CommandRunnerError::CommandFailed {
                    exit_code: Some(128),
                },
                "fatal: no tag exactly matches",
            ),
            Query::ShortCommit => InspectionResult::success("0c0ffee\n"),
            Query::Status => InspectionResult::success(""),
        }
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, location: &Path, args: &[String]) -> InspectionResult {
        let repo = location
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let Some(query) = Query::from_args(args) else {
            return InspectionResult::failure(
                CommandRunnerError::SpawnFailed(format!("unexpected arguments {:?}", args)),
                "",
            );
        };

        self.call_history.lock().unwrap().push((repo.clone(), query));

        let answer = self.answers.lock().unwrap().get(&(repo, query)).cloned();
        answer.unwrap_or_else(|| Self::default_answer(query))
    }
}
