use futures::stream::{self, StreamExt};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::common::truncate::{truncate_middle, truncate_trailing};
use crate::domain::entities::{
    repository::RepositoryDescriptor,
    status_report::{error_placeholder, ErrorEntry, StatusReport, StatusRow},
};
use crate::domain::value_objects::tag_selector::{TagSelector, TagSelectorError};
use crate::infrastructure::git::{
    inspector::{GitInspector, QueryFailure},
    status_parser::{ParsedStatus, StatusParser, UntrackedPolicy},
};
use crate::infrastructure::process::CommandRunner;

/// 各列の最大表示幅
pub const NAME_WIDTH: usize = 20;
pub const BRANCH_WIDTH: usize = 25;
pub const REF_WIDTH: usize = 10;
pub const LOCATION_WIDTH: usize = 60;

const CANCELLED_MESSAGE: &str = "status collection cancelled";

/// StatusCheck関連のエラー
#[derive(Debug, Error)]
pub enum StatusCheckError {
    #[error("Invalid tag selector: {0}")]
    InvalidSelector(#[from] TagSelectorError),

    #[error("Parallel job count must be at least 1")]
    InvalidParallelism,
}

/// ステータス確認の設定
#[derive(Debug, Clone, Default)]
pub struct StatusCheckConfig {
    /// 対象リポジトリのタグフィルタ
    pub selector: TagSelector,

    /// 最大並列数（Noneの場合はCPU数）
    pub max_parallel: Option<usize>,

    /// 未追跡ファイルの数え方
    pub untracked_policy: UntrackedPolicy,
}

impl StatusCheckConfig {
    /// 新しいStatusCheckConfigインスタンスを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// タグフィルタを設定
    pub fn with_selector(mut self, selector: TagSelector) -> Self {
        self.selector = selector;
        self
    }

    /// 最大並列数を設定
    pub fn with_max_parallel(mut self, max_parallel: usize) -> Self {
        self.max_parallel = Some(max_parallel);
        self
    }

    /// 未追跡ファイルの数え方を設定
    pub fn with_untracked_policy(mut self, policy: UntrackedPolicy) -> Self {
        self.untracked_policy = policy;
        self
    }
}

/// 1リポジトリ分の問い合わせ結果（エラー番号は未採番）
#[derive(Debug)]
struct RepositoryProbe {
    position: usize,
    branch: Result<String, QueryFailure>,
    ref_label: String,
    changes: Result<ParsedStatus, QueryFailure>,
}

/// エラー番号の採番を一箇所で行う
#[derive(Debug, Default)]
struct ErrorLedger {
    entries: Vec<ErrorEntry>,
}

impl ErrorLedger {
    fn record(&mut self, failure: QueryFailure) -> usize {
        let index = self.entries.len() + 1;
        self.entries.push(ErrorEntry {
            index,
            message: failure.message,
            detail: failure.detail,
        });
        index
    }

    fn into_entries(self) -> Vec<ErrorEntry> {
        self.entries
    }
}

/// ステータス確認のユースケース
pub struct StatusCheckUseCase {
    config: StatusCheckConfig,
    inspector: GitInspector,
}

impl StatusCheckUseCase {
    /// 新しいStatusCheckUseCaseインスタンスを作成
    pub fn new(config: StatusCheckConfig, runner: Arc<dyn CommandRunner>) -> Self {
        let parser = StatusParser::with_untracked_policy(config.untracked_policy);
        let inspector = GitInspector::new(runner).with_parser(parser);
        Self { config, inspector }
    }

    /// ステータス確認を実行
    pub async fn execute(
        &self,
        repos: &[RepositoryDescriptor],
    ) -> Result<StatusReport, StatusCheckError> {
        self.execute_until(repos, std::future::pending::<()>()).await
    }

    /// `cancel` が完了するまでステータス確認を実行
    ///
    /// キャンセル時は実行中のプロセスを破棄し、完了済みの結果で部分レポートを返す。
    pub async fn execute_until<F>(
        &self,
        repos: &[RepositoryDescriptor],
        cancel: F,
    ) -> Result<StatusReport, StatusCheckError>
    where
        F: Future<Output = ()>,
    {
        // 1. 設定の検証
        self.validate_config()?;

        // 2. 対象リポジトリの決定
        let targets = self.determine_target_repositories(repos);
        let max_parallel = self.max_parallel(targets.len());
        info!(
            "Collecting status for {} repositories ({} in parallel)",
            targets.len(),
            max_parallel
        );

        // 3. 並列に問い合わせ（完了順に受け取り、位置で並べ直す）
        let mut slots: Vec<Option<RepositoryProbe>> = targets.iter().map(|_| None).collect();
        let mut cancelled = false;
        {
            let probes = stream::iter(targets.iter().enumerate())
                .map(|(position, repo)| self.probe(position, repo))
                .buffer_unordered(max_parallel);
            tokio::pin!(probes);
            tokio::pin!(cancel);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut cancel => {
                        warn!("Status collection cancelled; rendering partial report");
                        cancelled = true;
                        break;
                    }
                    probe = probes.next() => match probe {
                        Some(probe) => {
                            debug!("Status collected for position {}", probe.position);
                            let position = probe.position;
                            slots[position] = Some(probe);
                        }
                        None => break,
                    },
                }
            }
        }

        // 4. リスト順に結合し、エラー番号を採番
        Ok(self.merge(&targets, slots, cancelled))
    }

    fn validate_config(&self) -> Result<(), StatusCheckError> {
        self.config.selector.validate()?;
        if self.config.max_parallel == Some(0) {
            return Err(StatusCheckError::InvalidParallelism);
        }
        Ok(())
    }

    /// 対象リポジトリの決定
    fn determine_target_repositories<'a>(
        &self,
        repos: &'a [RepositoryDescriptor],
    ) -> Vec<&'a RepositoryDescriptor> {
        repos
            .iter()
            .filter(|repo| self.config.selector.matches(repo.tag()))
            .collect()
    }

    fn max_parallel(&self, target_count: usize) -> usize {
        self.config
            .max_parallel
            .unwrap_or_else(|| std::cmp::min(target_count, num_cpus::get()))
            .max(1)
    }

    /// 単一リポジトリへの3つの問い合わせを同時に実行
    async fn probe(&self, position: usize, repo: &RepositoryDescriptor) -> RepositoryProbe {
        let location = repo.location.as_path();
        let (branch, ref_label, changes) = tokio::join!(
            self.inspector.current_branch(location),
            self.inspector.ref_label(location),
            self.inspector.change_status(location),
        );

        RepositoryProbe {
            position,
            branch,
            ref_label,
            changes,
        }
    }

    fn merge(
        &self,
        targets: &[&RepositoryDescriptor],
        slots: Vec<Option<RepositoryProbe>>,
        cancelled: bool,
    ) -> StatusReport {
        let mut ledger = ErrorLedger::default();
        let mut rows = Vec::with_capacity(targets.len());

        for (repo, slot) in targets.iter().zip(slots) {
            let row = match slot {
                Some(probe) => Self::build_row(repo, probe, &mut ledger),
                None => Self::cancelled_row(repo, &mut ledger),
            };
            rows.push(row);
        }

        StatusReport {
            rows,
            errors: ledger.into_entries(),
            partial: cancelled,
        }
    }

    fn build_row(
        repo: &RepositoryDescriptor,
        probe: RepositoryProbe,
        ledger: &mut ErrorLedger,
    ) -> StatusRow {
        let branch = match probe.branch {
            Ok(branch) => branch,
            Err(failure) => error_placeholder(ledger.record(failure)),
        };

        let (staged, unstaged) = match probe.changes {
            Ok(status) => (status.staged.summary(), status.unstaged.summary()),
            Err(failure) => {
                let placeholder = error_placeholder(ledger.record(failure));
                (placeholder.clone(), placeholder)
            }
        };

        StatusRow {
            name: truncate_middle(&repo.name, NAME_WIDTH),
            branch: truncate_trailing(&branch, BRANCH_WIDTH),
            ref_label: truncate_trailing(&probe.ref_label, REF_WIDTH),
            staged,
            unstaged,
            location: truncate_middle(&repo.location.display().to_string(), LOCATION_WIDTH),
        }
    }

    fn cancelled_row(repo: &RepositoryDescriptor, ledger: &mut ErrorLedger) -> StatusRow {
        let placeholder = error_placeholder(ledger.record(QueryFailure::new(CANCELLED_MESSAGE, "")));
        StatusRow {
            name: truncate_middle(&repo.name, NAME_WIDTH),
            branch: placeholder.clone(),
            ref_label: String::new(),
            staged: placeholder.clone(),
            unstaged: placeholder,
            location: truncate_middle(&repo.location.display().to_string(), LOCATION_WIDTH),
        }
    }
}
