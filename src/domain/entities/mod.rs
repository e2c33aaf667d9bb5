pub mod repository;
pub mod status_report;

pub use repository::RepositoryDescriptor;
pub use status_report::{ErrorEntry, StatusReport, StatusRow};
