pub mod branch_list;
pub mod status_check;

pub use branch_list::{BranchLine, BranchListConfig, BranchListUseCase};
pub use status_check::{StatusCheckConfig, StatusCheckError, StatusCheckUseCase};
