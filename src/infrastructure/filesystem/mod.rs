pub mod repo_store;

pub use repo_store::{default_registry_path, RepoStore, RepoStoreError};
