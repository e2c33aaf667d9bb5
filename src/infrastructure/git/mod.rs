pub mod inspector;
pub mod status_parser;

// Re-export main types for convenience
pub use inspector::{GitInspector, QueryFailure};
pub use status_parser::{ParsedStatus, StatusParser, UntrackedPolicy};
