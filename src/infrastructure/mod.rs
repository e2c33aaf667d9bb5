/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - Process execution (read-only git invocations with captured output)
/// - Git queries and porcelain status parsing
/// - File system storage for the repository registry
pub mod filesystem;
pub mod git;
pub mod process;

// Re-export commonly used types
pub use filesystem::repo_store::RepoStore;
pub use git::{GitInspector, StatusParser};
pub use process::{CommandRunner, GitCommandRunner, InspectionResult};
