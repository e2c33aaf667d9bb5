use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::entities::repository::RepositoryDescriptor;

const REGISTRY_DIR: &str = "gitfan";
const REGISTRY_FILE: &str = "repos.json";

/// Repository registry errors
#[derive(Debug, Error)]
pub enum RepoStoreError {
    #[error("Registry file read failed at {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("Registry file write failed at {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("Registry file is not valid JSON at {path}: {reason}")]
    ParseFailed { path: String, reason: String },

    #[error("Invalid repository path: {0}")]
    InvalidPath(String),

    #[error("Repository already registered: {0}")]
    AlreadyRegistered(String),
}

impl RepoStoreError {
    /// Registry file involved in the failure, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            RepoStoreError::ReadFailed { path, .. }
            | RepoStoreError::WriteFailed { path, .. }
            | RepoStoreError::ParseFailed { path, .. } => Some(path),
            RepoStoreError::InvalidPath(_) | RepoStoreError::AlreadyRegistered(_) => None,
        }
    }
}

/// Default registry location under the user's configuration directory
pub fn default_registry_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(REGISTRY_DIR).join(REGISTRY_FILE))
}

/// JSON-file backed list of registered repositories
#[derive(Debug, Clone)]
pub struct RepoStore {
    path: PathBuf,
}

impl RepoStore {
    /// Create a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all descriptors, creating an empty registry if none exists
    pub fn load(&self) -> Result<Vec<RepositoryDescriptor>, RepoStoreError> {
        if !self.path.exists() {
            info!("Creating empty repository registry at {}", self.path.display());
            self.save(&[])?;
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| RepoStoreError::ReadFailed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        let repos: Vec<RepositoryDescriptor> =
            serde_json::from_str(&contents).map_err(|e| RepoStoreError::ParseFailed {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        debug!("Loaded {} repositories from {}", repos.len(), self.path.display());
        Ok(repos)
    }

    /// Write all descriptors, creating parent directories as needed
    pub fn save(&self, repos: &[RepositoryDescriptor]) -> Result<(), RepoStoreError> {
        let write_failed = |e: &dyn std::fmt::Display| RepoStoreError::WriteFailed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| write_failed(&e))?;
            }
        }

        let mut json = serde_json::to_string_pretty(repos).map_err(|e| write_failed(&e))?;
        json.push('\n');
        fs::write(&self.path, json).map_err(|e| write_failed(&e))
    }

    /// Register the working copy at `location`.
    ///
    /// The name is the last path component; a location can only be
    /// registered once.
    pub fn register(
        &self,
        location: &Path,
        tag: Option<&str>,
    ) -> Result<RepositoryDescriptor, RepoStoreError> {
        let location = fs::canonicalize(location)
            .map_err(|e| RepoStoreError::InvalidPath(format!("{}: {}", location.display(), e)))?;

        let mut repos = self.load()?;
        if repos.iter().any(|r| r.location == location) {
            return Err(RepoStoreError::AlreadyRegistered(location.display().to_string()));
        }

        let descriptor =
            RepositoryDescriptor::from_location(location).with_tag(tag.unwrap_or_default());
        repos.push(descriptor.clone());
        self.save(&repos)?;

        info!("Registered {} at {}", descriptor.name, descriptor.location.display());
        Ok(descriptor)
    }

    /// Remove the first descriptor registered at `location`.
    ///
    /// Returns the removed descriptor, or `None` if nothing matched.
    pub fn unregister(&self, location: &Path) -> Result<Option<RepositoryDescriptor>, RepoStoreError> {
        // Entries may be stored under either spelling; a deleted working copy
        // has no canonical form at all
        let canonical = fs::canonicalize(location).ok();

        let mut repos = self.load()?;
        let Some(index) = repos.iter().position(|r| {
            r.location.as_path() == location || canonical.as_deref() == Some(r.location.as_path())
        }) else {
            debug!("No repository registered at {}", location.display());
            return Ok(None);
        };

        let removed = repos.remove(index);
        self.save(&repos)?;

        info!("Unregistered {} at {}", removed.name, removed.location.display());
        Ok(Some(removed))
    }
}
