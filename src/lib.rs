//! # gitfan - status at a glance across many git working copies
//!
//! `gitfan` keeps a small registry of local working copies and fans
//! read-only git queries out across them, collecting the current branch,
//! the tag or commit at HEAD and the staged/unstaged change counts into a
//! single table. A failing repository never aborts the batch: its cells
//! read `See Error: N` and the matching entry appears in a second table.
//!
//! ## Quick Start
//!
//! ```bash
//! gitfan @api register ~/src/edge-sdk
//! gitfan register ~/src/web
//! gitfan            # same as `gitfan table-status`
//! gitfan @api b     # current branch of every @api repository
//! ```
//!
//! ## Architecture
//!
//! - [`domain`]: descriptors, report rows and change counters
//! - [`application`]: the status aggregator and branch listing
//! - [`infrastructure`]: git subprocesses, porcelain parsing, the registry file
//! - [`presentation`]: CLI interface and table rendering
//! - [`common`]: shared error type and label truncation
//!
//! ## Library use
//!
//! ```no_run
//! use std::sync::Arc;
//! use gitfan::application::use_cases::{StatusCheckConfig, StatusCheckUseCase};
//! use gitfan::domain::entities::RepositoryDescriptor;
//! use gitfan::infrastructure::GitCommandRunner;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let repos = vec![RepositoryDescriptor::new("gitfan", ".")];
//! let use_case = StatusCheckUseCase::new(StatusCheckConfig::new(), Arc::new(GitCommandRunner::new()));
//! let report = use_case.execute(&repos).await?;
//! println!("{} rows, {} errors", report.rows.len(), report.errors.len());
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use common::error::GitfanError;
pub use common::result::GitfanResult as Result;
