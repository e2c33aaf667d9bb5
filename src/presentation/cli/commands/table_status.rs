use std::sync::Arc;

use crate::application::use_cases::status_check::{StatusCheckConfig, StatusCheckUseCase};
use crate::common::result::GitfanResult;
use crate::domain::entities::RepositoryDescriptor;
use crate::infrastructure::process::CommandRunner;
use crate::presentation::cli::OutputFormat;
use crate::presentation::ui::{DisplayHelper, ReportRenderer};

/// Handler for the table-status command
pub struct TableStatusCommand {
    pub config: StatusCheckConfig,
    pub output: OutputFormat,
}

impl TableStatusCommand {
    pub fn new(config: StatusCheckConfig, output: OutputFormat) -> Self {
        Self { config, output }
    }

    /// Collect and print the report; Ctrl-C prints what was collected so far
    pub async fn execute(
        &self,
        repos: &[RepositoryDescriptor],
        runner: Arc<dyn CommandRunner>,
        display: &DisplayHelper,
    ) -> GitfanResult<()> {
        let use_case = StatusCheckUseCase::new(self.config.clone(), runner);

        let spinner = display.create_spinner("Collecting repository status...");
        let report = use_case.execute_until(repos, interrupted()).await;
        spinner.finish_and_clear();
        let report = report?;

        let renderer = ReportRenderer::new(*display);
        let rendered = match self.output {
            OutputFormat::Text => renderer.render_text(&report),
            OutputFormat::Json => renderer.render_json(&report)? + "\n",
            OutputFormat::Yaml => renderer.render_yaml(&report)?,
        };
        print!("{}", rendered);

        Ok(())
    }
}

async fn interrupted() {
    // Without a signal handler the run is simply never cancelled
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
