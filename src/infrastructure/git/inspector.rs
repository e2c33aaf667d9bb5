use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use super::status_parser::{ParsedStatus, StatusParser};
use crate::infrastructure::process::{CommandRunner, InspectionResult};

const BRANCH_ARGS: &[&str] = &["rev-parse", "--abbrev-ref", "HEAD"];
const EXACT_TAG_ARGS: &[&str] = &["describe", "--tags", "--exact-match"];
const SHORT_COMMIT_ARGS: &[&str] = &["rev-parse", "--short", "HEAD"];
const STATUS_ARGS: &[&str] = &["status", "--porcelain=v2"];

/// A query that did not produce usable output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFailure {
    /// Short description (exit status, timeout, spawn error)
    pub message: String,
    /// Captured diagnostic stream
    pub detail: String,
}

impl QueryFailure {
    pub fn new(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: detail.into(),
        }
    }

    fn from_result(result: &InspectionResult) -> Option<Self> {
        result
            .failure
            .as_ref()
            .map(|error| Self::new(error.to_string(), result.stderr_text()))
    }
}

/// Read-only git queries against a working copy
#[derive(Clone)]
pub struct GitInspector {
    runner: Arc<dyn CommandRunner>,
    parser: StatusParser,
}

impl GitInspector {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            parser: StatusParser::new(),
        }
    }

    pub fn with_parser(mut self, parser: StatusParser) -> Self {
        self.parser = parser;
        self
    }

    async fn query(&self, location: &Path, args: &[&str]) -> InspectionResult {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        self.runner.run(location, &args).await
    }

    /// Abbreviated name of the checked-out branch
    pub async fn current_branch(&self, location: &Path) -> Result<String, QueryFailure> {
        let result = self.query(location, BRANCH_ARGS).await;
        match QueryFailure::from_result(&result) {
            Some(failure) => Err(failure),
            None => Ok(result.stdout_text()),
        }
    }

    /// Tag pointing exactly at HEAD, if any
    pub async fn exact_tag(&self, location: &Path) -> Option<String> {
        let result = self.query(location, EXACT_TAG_ARGS).await;
        Self::non_empty_output(result)
    }

    /// Abbreviated id of HEAD, if it resolves
    pub async fn short_commit(&self, location: &Path) -> Option<String> {
        let result = self.query(location, SHORT_COMMIT_ARGS).await;
        Self::non_empty_output(result)
    }

    /// Most specific reference label: exact tag, else short commit id.
    ///
    /// Failures here are not reported; an unresolvable HEAD yields "".
    pub async fn ref_label(&self, location: &Path) -> String {
        if let Some(tag) = self.exact_tag(location).await {
            return tag;
        }
        self.short_commit(location).await.unwrap_or_default()
    }

    /// Staged and unstaged change counts from the porcelain report
    pub async fn change_status(&self, location: &Path) -> Result<ParsedStatus, QueryFailure> {
        let result = self.query(location, STATUS_ARGS).await;
        if let Some(failure) = QueryFailure::from_result(&result) {
            return Err(failure);
        }
        let report = String::from_utf8_lossy(&result.stdout);
        Ok(self.parser.parse(&report))
    }

    fn non_empty_output(result: InspectionResult) -> Option<String> {
        if result.failed() {
            debug!("Reference query failed: {}", result.stderr_text());
            return None;
        }
        Some(result.stdout_text()).filter(|s| !s.is_empty())
    }
}
