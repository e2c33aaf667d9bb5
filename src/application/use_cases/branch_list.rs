use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::info;

use super::status_check::StatusCheckError;
use crate::domain::entities::repository::RepositoryDescriptor;
use crate::domain::value_objects::tag_selector::TagSelector;
use crate::infrastructure::git::inspector::{GitInspector, QueryFailure};
use crate::infrastructure::process::CommandRunner;

/// リポジトリごとの現在ブランチ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchLine {
    pub name: String,
    pub branch: Result<String, QueryFailure>,
}

/// ブランチ一覧の設定
#[derive(Debug, Clone, Default)]
pub struct BranchListConfig {
    pub selector: TagSelector,
    pub max_parallel: Option<usize>,
}

impl BranchListConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selector(mut self, selector: TagSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_max_parallel(mut self, max_parallel: usize) -> Self {
        self.max_parallel = Some(max_parallel);
        self
    }
}

/// ブランチ一覧のユースケース
pub struct BranchListUseCase {
    config: BranchListConfig,
    inspector: GitInspector,
}

impl BranchListUseCase {
    pub fn new(config: BranchListConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            config,
            inspector: GitInspector::new(runner),
        }
    }

    /// 対象リポジトリの現在ブランチをリスト順で返す
    pub async fn execute(
        &self,
        repos: &[RepositoryDescriptor],
    ) -> Result<Vec<BranchLine>, StatusCheckError> {
        self.config.selector.validate()?;
        let max_parallel = match self.config.max_parallel {
            Some(0) => return Err(StatusCheckError::InvalidParallelism),
            Some(n) => n,
            None => num_cpus::get(),
        };

        let targets: Vec<&RepositoryDescriptor> = repos
            .iter()
            .filter(|repo| self.config.selector.matches(repo.tag()))
            .collect();
        info!("Listing branches for {} repositories", targets.len());

        // `buffered` yields in input order
        let lines: Vec<BranchLine> = stream::iter(targets)
            .map(|repo| async move {
                BranchLine {
                    name: repo.name.clone(),
                    branch: self.inspector.current_branch(&repo.location).await,
                }
            })
            .buffered(max_parallel)
            .collect()
            .await;

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::process::command_runner::{
        CommandRunnerError, InspectionResult, MockCommandRunner,
    };
    use std::path::Path;

    fn runner() -> Arc<dyn CommandRunner> {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|location, _| {
            if location == Path::new("/src/gone") {
                InspectionResult::failure(
                    CommandRunnerError::CommandFailed { exit_code: Some(128) },
                    "fatal: cannot change to '/src/gone'",
                )
            } else {
                InspectionResult::success("develop\n")
            }
        });
        Arc::new(runner)
    }

    #[tokio::test]
    async fn test_lines_follow_list_order_with_inline_failures() {
        let repos = vec![
            RepositoryDescriptor::new("gone", "/src/gone"),
            RepositoryDescriptor::new("web", "/src/web").with_tag("ui"),
        ];
        let use_case = BranchListUseCase::new(BranchListConfig::new().with_max_parallel(2), runner());

        let lines = use_case.execute(&repos).await.unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].name, "gone");
        assert_eq!(lines[0].branch.as_ref().unwrap_err().message, "exit status 128");
        assert_eq!(lines[1].branch, Ok("develop".to_string()));
    }

    #[tokio::test]
    async fn test_selector_limits_repositories() {
        let repos = vec![
            RepositoryDescriptor::new("gone", "/src/gone"),
            RepositoryDescriptor::new("web", "/src/web").with_tag("ui"),
        ];
        let config = BranchListConfig::new().with_selector(TagSelector::from_filter("ui"));
        let lines = BranchListUseCase::new(config, runner())
            .execute(&repos)
            .await
            .unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "web");
    }
}
