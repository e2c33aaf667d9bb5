pub mod branches;
pub mod list;
pub mod register;
pub mod table_status;
pub mod unregister;

pub use branches::BranchesCommand;
pub use list::ListCommand;
pub use register::RegisterCommand;
pub use table_status::TableStatusCommand;
pub use unregister::UnregisterCommand;
