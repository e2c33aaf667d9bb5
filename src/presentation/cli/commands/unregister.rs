use std::path::PathBuf;

use crate::common::result::GitfanResult;
use crate::infrastructure::filesystem::RepoStore;
use crate::presentation::ui::DisplayHelper;

/// Handler for the unregister command
pub struct UnregisterCommand {
    pub path: PathBuf,
}

impl UnregisterCommand {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn execute(&self, store: &RepoStore, display: &DisplayHelper) -> GitfanResult<()> {
        match store.unregister(&self.path)? {
            Some(removed) => display.success(&format!(
                "Unregistered {} at {}",
                removed.name,
                removed.location.display()
            )),
            None => display.warning(&format!(
                "No repository registered at {}",
                self.path.display()
            )),
        }
        Ok(())
    }
}
