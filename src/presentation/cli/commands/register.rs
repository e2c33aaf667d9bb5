use std::path::PathBuf;

use crate::common::result::GitfanResult;
use crate::domain::value_objects::TagSelector;
use crate::infrastructure::filesystem::RepoStore;
use crate::presentation::ui::DisplayHelper;

/// Handler for the register command
pub struct RegisterCommand {
    pub path: PathBuf,
    pub selector: TagSelector,
}

impl RegisterCommand {
    pub fn new(path: PathBuf, selector: TagSelector) -> Self {
        Self { path, selector }
    }

    pub fn execute(&self, store: &RepoStore, display: &DisplayHelper) -> GitfanResult<()> {
        let descriptor = store.register(&self.path, self.selector.tag())?;

        let mut message = format!(
            "Registered {} at {}",
            descriptor.name,
            descriptor.location.display()
        );
        if let Some(tag) = descriptor.tag() {
            message.push_str(&format!(" with tag @{}", tag));
        }
        display.success(&message);
        Ok(())
    }
}
