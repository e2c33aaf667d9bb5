use colored::Colorize;
use std::sync::Arc;

use crate::application::use_cases::branch_list::{BranchLine, BranchListConfig, BranchListUseCase};
use crate::common::result::GitfanResult;
use crate::domain::entities::RepositoryDescriptor;
use crate::infrastructure::process::CommandRunner;
use crate::presentation::ui::DisplayHelper;

/// Handler for the branches command
pub struct BranchesCommand {
    pub config: BranchListConfig,
}

impl BranchesCommand {
    pub fn new(config: BranchListConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, lines: &[BranchLine], display: &DisplayHelper) -> String {
        let rows: Vec<Vec<String>> = lines
            .iter()
            .map(|line| {
                let branch = match &line.branch {
                    Ok(branch) => branch.clone(),
                    Err(failure) => {
                        let text = if failure.detail.is_empty() {
                            failure.message.clone()
                        } else {
                            format!("{}: {}", failure.message, failure.detail)
                        };
                        if display.use_color {
                            text.red().to_string()
                        } else {
                            text
                        }
                    }
                };
                let name = if display.use_color {
                    line.name.bold().to_string()
                } else {
                    line.name.clone()
                };
                vec![name, branch]
            })
            .collect();

        display.render_table(&["Name", "Branch"], &rows)
    }

    pub async fn execute(
        &self,
        repos: &[RepositoryDescriptor],
        runner: Arc<dyn CommandRunner>,
        display: &DisplayHelper,
    ) -> GitfanResult<()> {
        let use_case = BranchListUseCase::new(self.config.clone(), runner);
        let lines = use_case.execute(repos).await?;
        print!("{}", self.render(&lines, display));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::git::QueryFailure;

    #[test]
    fn test_failures_are_shown_inline() {
        let lines = vec![
            BranchLine {
                name: "api".to_string(),
                branch: Ok("main".to_string()),
            },
            BranchLine {
                name: "gone".to_string(),
                branch: Err(QueryFailure::new("exit status 128", "fatal: not a git repository")),
            },
        ];

        let out = BranchesCommand::new(BranchListConfig::new()).render(&lines, &DisplayHelper::new(false));
        let rendered: Vec<&str> = out.lines().collect();

        assert_eq!(rendered[2], "api   main");
        assert_eq!(rendered[3], "gone  exit status 128: fatal: not a git repository");
    }
}
