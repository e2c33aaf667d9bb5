pub mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::env;
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::application::use_cases::{branch_list::BranchListConfig, status_check::StatusCheckConfig};
use crate::common::result::OptionExt;
use crate::domain::value_objects::{split_tag_prefix, TagSelector};
use crate::infrastructure::filesystem::{default_registry_path, RepoStore};
use crate::infrastructure::process::{CommandRunner, GitCommandRunner, RunnerConfig};
use crate::presentation::ui::DisplayHelper;
use commands::{BranchesCommand, ListCommand, RegisterCommand, TableStatusCommand, UnregisterCommand};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("GIT_HASH"),
    "\nbuilt: ",
    env!("BUILD_DATE"),
    "\ntarget: ",
    env!("BUILD_TARGET"),
);

/// Output format options for table-status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables (default)
    #[default]
    Text,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// gitfan - status at a glance across many git working copies
///
/// Prefix any command with `@tag` to limit it to repositories registered
/// with that tag.
#[derive(Parser, Debug)]
#[command(name = "gitfan")]
#[command(about = "Status at a glance across many git working copies")]
#[command(override_usage = "gitfan [@tag] [OPTIONS] [COMMAND]")]
#[command(version, long_version = LONG_VERSION)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Repository registry file
    #[arg(long, global = true, env = "GITFAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of repositories inspected in parallel (defaults to CPU count)
    #[arg(short, long, global = true)]
    pub jobs: Option<usize>,

    /// Per-query timeout in seconds, 0 disables
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    /// git executable to invoke
    #[arg(long, global = true, default_value = "git")]
    pub git: String,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show branch, tag or commit, and change counts for each repository (default)
    #[command(visible_alias = "ts")]
    TableStatus {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Show the current branch of each repository
    #[command(visible_alias = "b")]
    Branches,

    /// Register a working copy, tagged with the leading @tag if given
    Register {
        /// Path to the working copy
        path: PathBuf,
    },

    /// Remove a working copy from the registry
    Unregister {
        /// Path to the working copy
        path: PathBuf,
    },

    /// List registered repositories
    List,
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
    selector: TagSelector,
}

impl CliApp {
    pub fn new() -> Result<Self> {
        Self::from_args(env::args().collect())
    }

    /// Split off a leading `@tag`, then parse the rest with clap
    pub fn from_args(args: Vec<String>) -> Result<Self> {
        let Some((program, rest)) = args.split_first() else {
            return Ok(Self {
                cli: Cli::parse_from(["gitfan"]),
                selector: TagSelector::NoTag,
            });
        };

        let (selector, rest) = split_tag_prefix(rest)?;
        let cli = Cli::parse_from(std::iter::once(program.clone()).chain(rest));

        Ok(Self { cli, selector })
    }

    pub fn cli(&self) -> &Cli {
        &self.cli
    }

    pub fn selector(&self) -> &TagSelector {
        &self.selector
    }

    /// Install the stderr log subscriber; `RUST_LOG` wins over `--verbose`
    pub fn init_tracing(&self) {
        let default_filter = if self.cli.verbose { "gitfan=debug" } else { "warn" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    pub async fn run(self) -> Result<()> {
        let display = DisplayHelper::detect(self.cli.no_color);

        match self.handle_command(&display).await {
            Ok(_) => Ok(()),
            Err(e) => {
                display.error(&format!("{:#}", e));
                exit(1);
            }
        }
    }

    async fn handle_command(&self, display: &DisplayHelper) -> Result<()> {
        let store = RepoStore::new(self.registry_path()?);

        if let Some(Commands::Register { path }) = &self.cli.command {
            return Ok(RegisterCommand::new(path.clone(), self.selector.clone())
                .execute(&store, display)?);
        }

        let repos = store
            .load()
            .with_context(|| format!("Failed to load {}", store.path().display()))?;
        if repos.is_empty() {
            display.info("No repositories registered. Add one with `gitfan [@tag] register <path>`.");
            return Ok(());
        }

        match &self.cli.command {
            None => {
                TableStatusCommand::new(self.status_config(), OutputFormat::default())
                    .execute(&repos, self.runner(), display)
                    .await?
            }
            Some(Commands::TableStatus { output }) => {
                TableStatusCommand::new(self.status_config(), *output)
                    .execute(&repos, self.runner(), display)
                    .await?
            }
            Some(Commands::Branches) => {
                BranchesCommand::new(self.branch_config())
                    .execute(&repos, self.runner(), display)
                    .await?
            }
            Some(Commands::Unregister { path }) => {
                UnregisterCommand::new(path.clone()).execute(&store, display)?
            }
            Some(Commands::List) => ListCommand::new(self.selector.clone()).execute(&repos, display),
            Some(Commands::Register { .. }) => {}
        }

        Ok(())
    }

    fn registry_path(&self) -> Result<PathBuf> {
        match &self.cli.config {
            Some(path) => Ok(path.clone()),
            None => Ok(default_registry_path()
                .ok_or_config_error("Could not determine the configuration directory; pass --config")?),
        }
    }

    fn runner(&self) -> Arc<dyn CommandRunner> {
        let config = RunnerConfig::new().with_executable(self.cli.git.clone());
        let config = match self.cli.timeout {
            0 => config.without_timeout(),
            secs => config.with_timeout(Duration::from_secs(secs)),
        };
        Arc::new(GitCommandRunner::with_config(config))
    }

    fn status_config(&self) -> StatusCheckConfig {
        let config = StatusCheckConfig::new().with_selector(self.selector.clone());
        match self.cli.jobs {
            Some(jobs) => config.with_max_parallel(jobs),
            None => config,
        }
    }

    fn branch_config(&self) -> BranchListConfig {
        let config = BranchListConfig::new().with_selector(self.selector.clone());
        match self.cli.jobs {
            Some(jobs) => config.with_max_parallel(jobs),
            None => config,
        }
    }
}
